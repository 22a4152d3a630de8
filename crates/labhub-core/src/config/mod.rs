//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod logging;
pub mod mail;
pub mod notification;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::mail::MailConfig;
pub use self::notification::NotificationConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Deserialization target for the merged TOML configuration
/// (`config/default.toml` + environment overlay + `LABHUB__*` variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Outbound email settings.
    #[serde(default)]
    pub mail: MailConfig,
    /// Notification delivery settings.
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Review workflow settings.
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

/// Review workflow limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Maximum accepted length of reviewer comments, in characters.
    #[serde(default = "default_max_comment_length")]
    pub max_comment_length: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_comment_length: default_max_comment_length(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// `path` names the base file (extension optional). An overlay
    /// `config/{env}` is merged on top, then environment variables
    /// prefixed with `LABHUB__`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("LABHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

fn default_max_comment_length() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_database_url_is_required() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "[database]\nurl = \"postgres://localhost/labhub\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("minimal config deserializes");

        assert_eq!(config.database.url, "postgres://localhost/labhub");
        assert!(!config.database.auto_migrate);
        assert!(!config.mail.enabled);
        assert_eq!(
            config.notifications.delivery_attempts,
            NotificationConfig::default().delivery_attempts
        );
        assert_eq!(config.workflow.max_comment_length, 5000);
    }

    #[test]
    fn test_missing_database_section_fails() {
        let result = config::Config::builder()
            .add_source(config::File::from_str("", config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize::<AppConfig>());
        assert!(result.is_err());
    }
}
