//! In-memory audit trail.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};

use crate::store::{AuditLogStore, AuditQuery};

/// Append-only audit log held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditLogStore {
    entries: Arc<RwLock<Vec<AuditLogEntry>>>,
}

impl MemoryAuditLogStore {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry in append order.
    pub async fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditLogStore for MemoryAuditLogStore {
    async fn append(&self, entry: CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        let entry = entry.into_entry(Utc::now());
        self.entries.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn search(
        &self,
        query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let entries = self.entries.read().await;
        // Append order already follows time; walk it backwards for newest first.
        let matching: Vec<AuditLogEntry> = entries
            .iter()
            .rev()
            .filter(|e| query.matches(e))
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(matching, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_search_newest_first() {
        let store = MemoryAuditLogStore::new();
        let project_id = Uuid::new_v4();
        for action in ["project.submitted", "project.under_review", "project.approved"] {
            store
                .append(CreateAuditLogEntry {
                    actor_id: None,
                    action: action.to_string(),
                    entity_type: "project".to_string(),
                    entity_id: Some(project_id),
                    details: None,
                })
                .await
                .expect("append");
        }

        let page = store
            .search(&AuditQuery::for_project(project_id), &PageRequest::new(1, 2))
            .await
            .expect("search");
        assert_eq!(page.total_items, 3);
        assert_eq!(page.items[0].action, "project.approved");
        assert!(page.has_next());
    }
}
