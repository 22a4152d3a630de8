//! Project repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use labhub_core::error::{AppError, ErrorKind};
use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_entity::project::{Project, ProjectFilter, ReviewPatch};

use crate::store::ProjectStore;

/// PostgreSQL-backed project storage.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to check project", e)
            })
    }
}

#[async_trait]
impl ProjectStore for ProjectRepository {
    async fn create(&self, p: &Project) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, submitted_by, student_name, student_email, roll_number, branch, year, \
             contact_number, is_team_project, team_size, team_members, category, project_title, description, \
             expected_outcomes, duration, required_resources, other_resources, status, faculty_comments, \
             reviewed_by, reviewed_at, version, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, \
             $20, $21, $22, $23, $24, $25) RETURNING *",
        )
        .bind(p.id)
        .bind(p.submitted_by)
        .bind(&p.student_name)
        .bind(&p.student_email)
        .bind(&p.roll_number)
        .bind(&p.branch)
        .bind(&p.year)
        .bind(&p.contact_number)
        .bind(p.is_team_project)
        .bind(p.team_size)
        .bind(&p.team_members)
        .bind(p.category)
        .bind(&p.project_title)
        .bind(&p.description)
        .bind(&p.expected_outcomes)
        .bind(&p.duration)
        .bind(&p.required_resources)
        .bind(&p.other_resources)
        .bind(p.status)
        .bind(&p.faculty_comments)
        .bind(p.reviewed_by)
        .bind(p.reviewed_at)
        .bind(p.version)
        .bind(p.created_at)
        .bind(p.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to create project", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find project", e))
    }

    async fn list(
        &self,
        filter: &ProjectFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        let mut conditions = Vec::new();
        let mut param_idx = 1u32;

        if filter.status.is_some() {
            conditions.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if filter.submitter_email.is_some() {
            conditions.push(format!("LOWER(student_email) = LOWER(${param_idx})"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM projects {where_clause}");
        let select_sql = format!(
            "SELECT * FROM projects {where_clause} ORDER BY created_at DESC, id LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Project>(&select_sql);

        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
            select_query = select_query.bind(status);
        }
        if let Some(email) = &filter.submitter_email {
            count_query = count_query.bind(email.trim().to_string());
            select_query = select_query.bind(email.trim().to_string());
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to count projects", e)
        })?;

        let projects = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to list projects", e)
            })?;

        Ok(PageResponse::new(projects, page, total as u64))
    }

    async fn write_conditional(
        &self,
        id: Uuid,
        expected_version: i64,
        patch: &ReviewPatch,
    ) -> AppResult<Project> {
        let updated = sqlx::query_as::<_, Project>(
            "UPDATE projects SET status = $3, faculty_comments = $4, reviewed_by = $5, reviewed_at = $6, \
             updated_at = $7, version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected_version)
        .bind(patch.status)
        .bind(&patch.faculty_comments)
        .bind(patch.reviewed_by)
        .bind(patch.reviewed_at)
        .bind(patch.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to update project", e))?;

        match updated {
            Some(project) => Ok(project),
            None if self.exists(id).await? => {
                debug!(project_id = %id, expected_version, "Conditional write lost the race");
                Err(AppError::conflict(
                    "Project was modified concurrently; reload it and try again",
                ))
            }
            None => Err(AppError::not_found(format!("Project {id} not found"))),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Persistence, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
