//! Best-effort audit recording.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_database::store::{AuditLogStore, AuditQuery};
use labhub_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};
use labhub_entity::project::ProjectStatus;

/// Entity type written for project entries.
pub const PROJECT_ENTITY: &str = "project";

/// Action tag for a status transition, e.g. `project.approved`.
pub fn transition_action(status: ProjectStatus) -> String {
    format!("{PROJECT_ENTITY}.{}", status.as_str())
}

/// Appends audit entries after the business write has committed.
///
/// A failed append is logged and swallowed; it never undoes or fails the
/// action it describes.
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditLogStore>,
}

impl AuditRecorder {
    /// Creates a recorder over an audit store.
    pub fn new(store: Arc<dyn AuditLogStore>) -> Self {
        Self { store }
    }

    /// Append one entry. Returns the stored entry, or `None` if the write
    /// failed.
    pub async fn record(
        &self,
        actor_id: Option<Uuid>,
        action: &str,
        entity_type: &str,
        entity_id: Option<Uuid>,
        details: Option<serde_json::Value>,
    ) -> Option<AuditLogEntry> {
        let entry = CreateAuditLogEntry {
            actor_id,
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id,
            details,
        };

        match self.store.append(entry).await {
            Ok(stored) => Some(stored),
            Err(e) => {
                error!(
                    action,
                    entity_type,
                    entity_id = ?entity_id,
                    actor_id = ?actor_id,
                    error = %e,
                    "Audit entry lost; the audit trail is incomplete"
                );
                None
            }
        }
    }

    /// Search the audit trail, newest first.
    pub async fn search(
        &self,
        query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        self.store.search(query, page).await
    }
}
