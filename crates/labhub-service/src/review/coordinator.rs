//! Review session coordinator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use labhub_core::config::WorkflowConfig;
use labhub_core::error::AppError;
use labhub_core::result::AppResult;
use labhub_database::store::ProjectStore;
use labhub_entity::project::{Project, ProjectStatus};

use crate::audit::AuditRecorder;
use crate::audit::recorder::{PROJECT_ENTITY, transition_action};
use crate::context::RequestContext;
use crate::notification::NotificationDispatcher;
use crate::workflow::WorkflowEngine;

/// One requested status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Project to change.
    pub project_id: Uuid,
    /// Target status.
    pub status: ProjectStatus,
    /// Reviewer comments. Required for approved and rejected.
    #[serde(default)]
    pub comments: Option<String>,
}

/// The only entry point for changing a project's status.
///
/// Per call: refuse view-only actors → check the request → read → decide → conditional write →
/// audit → notify. Audit and notification run once, after the write
/// commits, and their failures never reach the caller.
#[derive(Debug, Clone)]
pub struct ReviewCoordinator {
    projects: Arc<dyn ProjectStore>,
    engine: WorkflowEngine,
    audit: AuditRecorder,
    dispatcher: NotificationDispatcher,
    config: WorkflowConfig,
}

impl ReviewCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        engine: WorkflowEngine,
        audit: AuditRecorder,
        dispatcher: NotificationDispatcher,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            projects,
            engine,
            audit,
            dispatcher,
            config,
        }
    }

    /// Apply a review action and return the updated project.
    ///
    /// Errors: `Authorization` (a `view_only` actor gets it before anything
    /// else), `Validation` for an oversized comment, `NotFound`, `MissingComments`, `Conflict` when another reviewer
    /// wrote first (re-read and retry), `Persistence`.
    pub async fn review(&self, ctx: &RequestContext, request: ReviewRequest) -> AppResult<Project> {
        if let Err(e) = self.engine.require_mutating_role(Some(&ctx.actor)) {
            warn!(
                project_id = %request.project_id,
                actor_id = %ctx.actor.id,
                "Review refused for view-only actor"
            );
            return Err(e);
        }
        self.check_request(&request)?;

        let current = self
            .projects
            .find_by_id(request.project_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {} not found", request.project_id)))?;

        let patch = match self.engine.transition(
            &current,
            Some(&ctx.actor),
            request.status,
            request.comments.as_deref(),
            ctx.request_time,
        ) {
            Ok(patch) => patch,
            Err(e) => {
                warn!(
                    project_id = %current.id,
                    actor_id = %ctx.actor.id,
                    from = %current.status,
                    to = %request.status,
                    kind = %e.kind,
                    "Review refused"
                );
                return Err(e);
            }
        };

        let updated = self
            .projects
            .write_conditional(current.id, current.version, &patch)
            .await?;

        info!(
            project_id = %updated.id,
            actor_id = %ctx.actor.id,
            from = %current.status,
            to = %updated.status,
            version = updated.version,
            "Project status changed"
        );

        self.audit
            .record(
                Some(ctx.actor.id),
                &transition_action(updated.status),
                PROJECT_ENTITY,
                Some(updated.id),
                Some(json!({
                    "from": current.status,
                    "to": updated.status,
                    "comments": request.comments.as_deref().map(str::trim).filter(|c| !c.is_empty()),
                })),
            )
            .await;

        self.dispatcher
            .notify_on_transition(&updated, current.status)
            .await;

        Ok(updated)
    }

    fn check_request(&self, request: &ReviewRequest) -> AppResult<()> {
        let length = request
            .comments
            .as_deref()
            .map(|c| c.trim().chars().count())
            .unwrap_or(0) as u64;
        if length > self.config.max_comment_length {
            return Err(AppError::invalid_field(
                "comments",
                format!(
                    "Comments must be at most {} characters",
                    self.config.max_comment_length
                ),
            ));
        }
        Ok(())
    }
}
