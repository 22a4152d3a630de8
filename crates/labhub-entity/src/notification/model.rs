//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A notification addressed to a single user.
///
/// Only the owning user mutates it afterwards (mark read, delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Project the notification is about, if any.
    pub project_id: Option<Uuid>,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Optional deep link into the UI.
    pub link: Option<String>,
    /// Whether the recipient has read this notification.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateNotification {
    /// Recipient user.
    pub user_id: Uuid,
    /// Related project.
    pub project_id: Option<Uuid>,
    /// Title.
    pub title: String,
    /// Message.
    pub message: String,
    /// Deep link.
    pub link: Option<String>,
}

impl CreateNotification {
    /// Materialize as an unread notification.
    pub fn into_notification(self, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            project_id: self.project_id,
            title: self.title,
            message: self.message,
            link: self.link,
            is_read: false,
            created_at,
        }
    }
}
