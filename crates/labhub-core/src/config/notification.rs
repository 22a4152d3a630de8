//! Notification delivery configuration.

use serde::{Deserialize, Serialize};

/// Notification persistence and linking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How many times persisting a notification is attempted before giving up.
    #[serde(default = "default_delivery_attempts")]
    pub delivery_attempts: u32,
    /// Path prefix used to build the deep link to a project, e.g. `/projects`.
    #[serde(default = "default_link_base")]
    pub link_base: String,
}

impl NotificationConfig {
    /// Deep link for a project page.
    pub fn project_link(&self, project_id: impl std::fmt::Display) -> String {
        format!("{}/{project_id}", self.link_base.trim_end_matches('/'))
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            delivery_attempts: default_delivery_attempts(),
            link_base: default_link_base(),
        }
    }
}

fn default_delivery_attempts() -> u32 {
    3
}

fn default_link_base() -> String {
    "/projects".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_link_strips_trailing_slash() {
        let config = NotificationConfig {
            link_base: "/dashboard/projects/".to_string(),
            ..NotificationConfig::default()
        };
        assert_eq!(config.project_link("abc"), "/dashboard/projects/abc");
    }
}
