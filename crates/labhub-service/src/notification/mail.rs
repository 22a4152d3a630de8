//! Outbound email through the external mail service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use labhub_core::config::MailConfig;
use labhub_core::error::{AppError, ErrorKind};
use labhub_core::result::AppResult;

/// Payload accepted by the mail service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailMessage {
    /// Recipient address.
    pub email: String,
    /// Recipient display name.
    pub name: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Template key on the mail service side, e.g. `submission`, `approved`.
    pub email_type: String,
    /// Title of the project the mail is about.
    pub project_name: String,
}

/// Delivers one email. Callers treat failures as non-fatal.
#[async_trait]
pub trait MailSender: Send + Sync + std::fmt::Debug {
    /// Attempt delivery once.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;
}

/// Posts messages as JSON to the configured mail-service endpoint.
#[derive(Debug, Clone)]
pub struct HttpMailSender {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMailSender {
    /// Build a sender with the configured endpoint and timeout.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build mail client: {e}"),
                    e,
                )
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl MailSender for HttpMailSender {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Mail service unreachable: {e}"),
                    e,
                )
            })?;

        response.error_for_status().map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("Mail service rejected message: {e}"),
                e,
            )
        })?;

        debug!(to = %message.email, email_type = %message.email_type, "Mail delivered");
        Ok(())
    }
}

/// Logs messages instead of sending them. Used when mail is disabled.
#[derive(Debug, Clone, Default)]
pub struct LogMailSender;

#[async_trait]
impl MailSender for LogMailSender {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            to = %message.email,
            subject = %message.subject,
            email_type = %message.email_type,
            "Mail disabled; message not sent"
        );
        Ok(())
    }
}

/// Pick the sender the configuration asks for.
pub fn mail_sender_from_config(config: &MailConfig) -> AppResult<Arc<dyn MailSender>> {
    if config.enabled {
        Ok(Arc::new(HttpMailSender::new(config)?))
    } else {
        Ok(Arc::new(LogMailSender))
    }
}
