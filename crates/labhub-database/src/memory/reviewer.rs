//! In-memory reviewer directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use labhub_core::result::AppResult;
use labhub_entity::reviewer::Reviewer;

use crate::store::ReviewerStore;

/// Reviewer records held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReviewerStore {
    reviewers: Arc<RwLock<HashMap<Uuid, Reviewer>>>,
}

impl MemoryReviewerStore {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a reviewer.
    pub async fn insert(&self, reviewer: Reviewer) {
        self.reviewers.write().await.insert(reviewer.id, reviewer);
    }
}

#[async_trait]
impl ReviewerStore for MemoryReviewerStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reviewer>> {
        Ok(self.reviewers.read().await.get(&id).cloned())
    }
}
