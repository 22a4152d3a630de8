//! Persistence contracts consumed by the workflow services.
//!
//! Implementations must be safe to share across tasks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};
use labhub_entity::notification::model::{CreateNotification, Notification};
use labhub_entity::project::{Project, ProjectFilter, ReviewPatch};
use labhub_entity::reviewer::Reviewer;

/// Durable storage for project records.
#[async_trait]
pub trait ProjectStore: Send + Sync + std::fmt::Debug {
    /// Insert a new project.
    async fn create(&self, project: &Project) -> AppResult<Project>;

    /// Read a project by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>>;

    /// List projects matching a filter, newest first.
    async fn list(
        &self,
        filter: &ProjectFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>>;

    /// Apply a review patch only if the stored version still equals
    /// `expected_version`.
    ///
    /// On success the version is bumped by one and the updated record is
    /// returned. A version mismatch yields a `Conflict` error and a missing
    /// row a `NotFound` error; neither writes anything.
    async fn write_conditional(
        &self,
        id: Uuid,
        expected_version: i64,
        patch: &ReviewPatch,
    ) -> AppResult<Project>;

    /// Delete a project. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Filters for searching the audit trail. Unset fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditQuery {
    /// Entries by this actor.
    pub actor_id: Option<Uuid>,
    /// Entries with this exact action tag.
    pub action: Option<String>,
    /// Entries about this entity type.
    pub entity_type: Option<String>,
    /// Entries about this entity.
    pub entity_id: Option<Uuid>,
}

impl AuditQuery {
    /// Every entry about one project.
    pub fn for_project(project_id: Uuid) -> Self {
        Self {
            entity_type: Some("project".to_string()),
            entity_id: Some(project_id),
            ..Self::default()
        }
    }

    /// Check whether an entry passes this query.
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.actor_id.is_none_or(|id| entry.actor_id == Some(id))
            && self.action.as_deref().is_none_or(|a| entry.action == a)
            && self
                .entity_type
                .as_deref()
                .is_none_or(|t| entry.entity_type == t)
            && self.entity_id.is_none_or(|id| entry.entity_id == Some(id))
    }
}

/// Append-only audit trail.
#[async_trait]
pub trait AuditLogStore: Send + Sync + std::fmt::Debug {
    /// Append one entry.
    async fn append(&self, entry: CreateAuditLogEntry) -> AppResult<AuditLogEntry>;

    /// Search entries, newest first.
    async fn search(
        &self,
        query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>>;
}

/// Per-user notification storage.
///
/// Every mutating call is scoped by `user_id`; other users' rows are never
/// touched.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug {
    /// Persist a new unread notification.
    async fn create(&self, data: CreateNotification) -> AppResult<Notification>;

    /// List a user's notifications, newest first.
    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a user's unread notifications.
    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64>;

    /// Mark one notification read. Returns `false` if the user owns no such
    /// notification.
    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Mark all of a user's notifications read. Returns how many changed.
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64>;

    /// Delete one notification. Returns `false` if the user owns no such
    /// notification.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

/// Read access to the reviewer directory.
#[async_trait]
pub trait ReviewerStore: Send + Sync + std::fmt::Debug {
    /// Look up a reviewer by user ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reviewer>>;
}
