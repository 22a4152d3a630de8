//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Settings for the external mail-service collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Whether emails are sent at all. When disabled, messages are only logged.
    #[serde(default)]
    pub enabled: bool,
    /// HTTP endpoint of the mail service that accepts send requests.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Display name used in email bodies.
    #[serde(default = "default_lab_name")]
    pub lab_name: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            lab_name: default_lab_name(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:3001/api/send-email".to_string()
}

fn default_lab_name() -> String {
    "Robotics Lab".to_string()
}

fn default_timeout() -> u64 {
    10
}
