//! Reviewer directory repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use labhub_core::error::{AppError, ErrorKind};
use labhub_core::result::AppResult;
use labhub_entity::reviewer::Reviewer;

use crate::store::ReviewerStore;

/// Read-only view over the `reviewers` table.
#[derive(Debug, Clone)]
pub struct ReviewerRepository {
    pool: PgPool,
}

impl ReviewerRepository {
    /// Create a new reviewer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewerStore for ReviewerRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reviewer>> {
        sqlx::query_as::<_, Reviewer>("SELECT * FROM reviewers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to find reviewer", e)
            })
    }
}
