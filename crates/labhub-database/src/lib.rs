//! # labhub-database
//!
//! Persistence for LabHub. The workflow only sees the async store traits in
//! [`store`]; [`repositories`] backs them with PostgreSQL and [`memory`]
//! with process-local maps for single-node runs and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use sqlx::PgPool;

pub use connection::DatabasePool;
pub use store::{AuditLogStore, AuditQuery, NotificationStore, ProjectStore, ReviewerStore};

/// One handle per store, shared by the services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Project records.
    pub projects: Arc<dyn ProjectStore>,
    /// Audit trail.
    pub audit: Arc<dyn AuditLogStore>,
    /// User notifications.
    pub notifications: Arc<dyn NotificationStore>,
    /// Reviewer directory.
    pub reviewers: Arc<dyn ReviewerStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            projects: Arc::new(repositories::ProjectRepository::new(pool.clone())),
            audit: Arc::new(repositories::AuditLogRepository::new(pool.clone())),
            notifications: Arc::new(repositories::NotificationRepository::new(pool.clone())),
            reviewers: Arc::new(repositories::ReviewerRepository::new(pool)),
        }
    }

    /// Empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            projects: Arc::new(memory::MemoryProjectStore::new()),
            audit: Arc::new(memory::MemoryAuditLogStore::new()),
            notifications: Arc::new(memory::MemoryNotificationStore::new()),
            reviewers: Arc::new(memory::MemoryReviewerStore::new()),
        }
    }
}
