//! Project submission, lookup, listing and deletion.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use labhub_auth::rbac::{Capability, CapabilityEnforcer, Requirement};
use labhub_core::error::AppError;
use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_database::store::ProjectStore;
use labhub_entity::project::{Project, ProjectDraft, ProjectFilter, validate};

use crate::audit::AuditRecorder;
use crate::audit::recorder::PROJECT_ENTITY;
use crate::context::RequestContext;
use crate::notification::{MailMessage, MailSender};

/// Everything about projects except status changes.
#[derive(Debug, Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectStore>,
    audit: AuditRecorder,
    mailer: Arc<dyn MailSender>,
    enforcer: CapabilityEnforcer,
    lab_name: String,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        audit: AuditRecorder,
        mailer: Arc<dyn MailSender>,
        lab_name: String,
    ) -> Self {
        Self {
            projects,
            audit,
            mailer,
            enforcer: CapabilityEnforcer::new(),
            lab_name,
        }
    }

    /// Validate and store a new submission as `pending`.
    ///
    /// Open to any caller. Sends a confirmation email on a best-effort basis.
    pub async fn submit(&self, ctx: &RequestContext, draft: &ProjectDraft) -> AppResult<Project> {
        let valid = validate(draft)?;
        let project = self
            .projects
            .create(&valid.into_project(ctx.user_id(), ctx.request_time))
            .await?;

        info!(
            project_id = %project.id,
            submitted_by = %project.submitted_by,
            category = %project.category,
            "Project submitted"
        );

        self.audit
            .record(
                Some(ctx.user_id()),
                "project.submitted",
                PROJECT_ENTITY,
                Some(project.id),
                Some(json!({
                    "title": project.project_title,
                    "category": project.category,
                    "team": project.is_team_project,
                })),
            )
            .await;

        let confirmation = MailMessage {
            email: project.student_email.clone(),
            name: project.student_name.clone(),
            subject: format!("Submission received: {}", project.project_title),
            body: format!(
                "Hi {},\n\nWe received your project proposal \"{}\". Reviewers will be in touch.\n\n{}",
                project.student_name, project.project_title, self.lab_name
            ),
            email_type: "submission".to_string(),
            project_name: project.project_title.clone(),
        };
        if let Err(e) = self.mailer.send(&confirmation).await {
            warn!(project_id = %project.id, error = %e, "Confirmation email not delivered");
        }

        Ok(project)
    }

    /// Fetch one project.
    pub async fn get(&self, id: Uuid) -> AppResult<Project> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// List projects, newest first.
    pub async fn list(
        &self,
        filter: &ProjectFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        self.projects.list(filter, page).await
    }

    /// Delete a project. Requires the delete capability.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        self.enforcer
            .require(Some(&ctx.actor), Requirement::Has(Capability::Delete))?;

        let project = self.get(id).await?;
        if !self.projects.delete(id).await? {
            return Err(AppError::not_found(format!("Project {id} not found")));
        }

        info!(project_id = %id, actor_id = %ctx.user_id(), "Project deleted");

        self.audit
            .record(
                Some(ctx.user_id()),
                "project.deleted",
                PROJECT_ENTITY,
                Some(id),
                Some(json!({
                    "title": project.project_title,
                    "status": project.status,
                })),
            )
            .await;

        Ok(())
    }
}
