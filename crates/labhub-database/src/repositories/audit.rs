//! Audit log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use labhub_core::error::{AppError, ErrorKind};
use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};

use crate::store::{AuditLogStore, AuditQuery};

/// Repository for audit log entries. Insert and select only.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogStore for AuditLogRepository {
    async fn append(&self, data: CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        sqlx::query_as::<_, AuditLogEntry>(
            "INSERT INTO audit_log (actor_id, action, entity_type, entity_id, details) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.actor_id)
        .bind(&data.action)
        .bind(&data.entity_type)
        .bind(data.entity_id)
        .bind(&data.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to append audit entry", e))
    }

    async fn search(
        &self,
        query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if query.actor_id.is_some() {
            conditions.push(format!("actor_id = ${param_idx}"));
            param_idx += 1;
        }
        if query.action.is_some() {
            conditions.push(format!("action = ${param_idx}"));
            param_idx += 1;
        }
        if query.entity_type.is_some() {
            conditions.push(format!("entity_type = ${param_idx}"));
            param_idx += 1;
        }
        if query.entity_id.is_some() {
            conditions.push(format!("entity_id = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM audit_log {where_clause}");
        let select_sql = format!(
            "SELECT * FROM audit_log {where_clause} ORDER BY created_at DESC LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, AuditLogEntry>(&select_sql);

        if let Some(actor_id) = query.actor_id {
            count_query = count_query.bind(actor_id);
            select_query = select_query.bind(actor_id);
        }
        if let Some(action) = &query.action {
            count_query = count_query.bind(action.clone());
            select_query = select_query.bind(action.clone());
        }
        if let Some(entity_type) = &query.entity_type {
            count_query = count_query.bind(entity_type.clone());
            select_query = select_query.bind(entity_type.clone());
        }
        if let Some(entity_id) = query.entity_id {
            count_query = count_query.bind(entity_id);
            select_query = select_query.bind(entity_id);
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to count audit entries", e)
        })?;

        let entries = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to search audit log", e)
            })?;

        Ok(PageResponse::new(entries, page, total as u64))
    }
}
