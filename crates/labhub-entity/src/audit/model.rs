//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable audit log entry recording a mutating action.
///
/// Entries are never updated or deleted after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    /// Unique audit entry identifier.
    pub id: Uuid,
    /// The actor who performed the action; `None` for system actions.
    pub actor_id: Option<Uuid>,
    /// The action tag, e.g. `"project.approved"`.
    pub action: String,
    /// The type of the affected entity, e.g. `"project"`.
    pub entity_type: String,
    /// The affected entity's ID.
    pub entity_id: Option<Uuid>,
    /// Structured detail payload.
    pub details: Option<serde_json::Value>,
    /// When the action was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuditLogEntry {
    /// The acting user, if any.
    pub actor_id: Option<Uuid>,
    /// The action tag.
    pub action: String,
    /// Affected entity type.
    pub entity_type: String,
    /// Affected entity ID.
    pub entity_id: Option<Uuid>,
    /// Additional details.
    pub details: Option<serde_json::Value>,
}

impl CreateAuditLogEntry {
    /// Materialize the entry with a fresh ID and timestamp.
    pub fn into_entry(self, created_at: DateTime<Utc>) -> AuditLogEntry {
        AuditLogEntry {
            id: Uuid::new_v4(),
            actor_id: self.actor_id,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            details: self.details,
            created_at,
        }
    }
}
