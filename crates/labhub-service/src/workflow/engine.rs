//! Applies one requested status change to a project, in memory.

use chrono::{DateTime, Utc};
use tracing::debug;

use labhub_auth::rbac::CapabilityEnforcer;
use labhub_core::error::AppError;
use labhub_core::result::AppResult;
use labhub_entity::project::{Project, ProjectStatus, ReviewPatch};
use labhub_entity::reviewer::Actor;

use super::table::TransitionTable;

/// The status state machine.
///
/// Pure: it decides and builds the patch but never writes anything.
#[derive(Debug, Clone, Default)]
pub struct WorkflowEngine {
    table: TransitionTable,
    enforcer: CapabilityEnforcer,
}

impl WorkflowEngine {
    /// Engine with the standard table and role grants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom table and enforcer.
    pub fn with_parts(table: TransitionTable, enforcer: CapabilityEnforcer) -> Self {
        Self { table, enforcer }
    }

    /// The transition table in use.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Refuse `view_only` and anonymous actors.
    ///
    /// Callers run this before touching the store so a refused actor learns
    /// nothing about the project.
    pub fn require_mutating_role(&self, actor: Option<&Actor>) -> AppResult<()> {
        self.enforcer.require_mutating_role(actor)
    }

    /// Decide a transition and build the patch that carries it out.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// 1. `view_only` or missing actor → `Authorization`
    /// 2. edge requirement not met → `Authorization`
    /// 3. target is approved/rejected and comments are blank → `MissingComments`
    ///
    /// A move back to `pending` clears the review fields. Any other move
    /// overwrites them with this actor and `now`. Blank comments keep the
    /// previous comments.
    pub fn transition(
        &self,
        project: &Project,
        actor: Option<&Actor>,
        requested: ProjectStatus,
        comments: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<ReviewPatch> {
        self.enforcer.require_mutating_role(actor)?;

        let rule = self
            .table
            .rule(project.status, requested)
            .ok_or_else(|| {
                AppError::internal(format!(
                    "No transition rule for {} -> {requested}",
                    project.status
                ))
            })?;

        self.enforcer.require(actor, rule.requirement)?;

        let comments = comments.map(str::trim).filter(|c| !c.is_empty());
        if rule.comments_required && comments.is_none() {
            return Err(AppError::missing_comments(format!(
                "Comments are required to mark a project as {}",
                requested.label().to_lowercase()
            )));
        }

        debug!(
            project_id = %project.id,
            from = %project.status,
            to = %requested,
            "Transition accepted"
        );

        let (reviewed_by, reviewed_at) = match (requested, actor) {
            (ProjectStatus::Pending, _) => (None, None),
            (_, Some(a)) => (Some(a.id), Some(now)),
            (_, None) => (None, Some(now)),
        };

        Ok(ReviewPatch {
            status: requested,
            faculty_comments: comments
                .map(str::to_string)
                .or_else(|| project.faculty_comments.clone()),
            reviewed_by,
            reviewed_at,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labhub_core::error::ErrorKind;
    use labhub_entity::project::{ProjectDraft, validate};
    use labhub_entity::reviewer::{PermissionBag, ReviewerRole};
    use uuid::Uuid;

    fn project(status: ProjectStatus) -> Project {
        let draft = ProjectDraft {
            student_name: Some("Asha Rao".into()),
            student_email: Some("asha@lab.edu".into()),
            roll_number: Some("21CS042".into()),
            branch: Some("CSE".into()),
            year: Some("3".into()),
            category: Some("iot".into()),
            project_title: Some("Greenhouse monitor".into()),
            description: Some("Soil moisture telemetry".into()),
            duration: Some("6 weeks".into()),
            ..ProjectDraft::default()
        };
        let mut p = validate(&draft)
            .expect("valid draft")
            .into_project(Uuid::new_v4(), Utc::now());
        if status != ProjectStatus::Pending {
            p.status = status;
            p.reviewed_by = Some(Uuid::new_v4());
            p.reviewed_at = Some(Utc::now());
        }
        p
    }

    fn actor(role: ReviewerRole, can_approve: bool, can_edit: bool) -> Actor {
        Actor::new(
            Uuid::new_v4(),
            role,
            PermissionBag {
                can_approve,
                can_edit,
                can_delete: false,
            },
        )
    }

    #[test]
    fn test_view_only_rejected_for_every_target() {
        let engine = WorkflowEngine::new();
        let viewer = actor(ReviewerRole::ViewOnly, true, true);
        for from in ProjectStatus::ALL {
            for to in ProjectStatus::ALL {
                let err = engine
                    .transition(&project(from), Some(&viewer), to, Some("fine"), Utc::now())
                    .expect_err("view_only never mutates");
                assert_eq!(err.kind, ErrorKind::Authorization);
            }
        }
    }

    #[test]
    fn test_authorization_checked_before_comments() {
        let engine = WorkflowEngine::new();
        let faculty = actor(ReviewerRole::Faculty, false, false);
        let err = engine
            .transition(
                &project(ProjectStatus::UnderReview),
                Some(&faculty),
                ProjectStatus::Approved,
                None,
                Utc::now(),
            )
            .expect_err("no capability");
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[test]
    fn test_decision_requires_comments() {
        let engine = WorkflowEngine::new();
        let admin = actor(ReviewerRole::Admin, true, false);
        for to in [ProjectStatus::Approved, ProjectStatus::Rejected] {
            let err = engine
                .transition(
                    &project(ProjectStatus::Pending),
                    Some(&admin),
                    to,
                    Some("   "),
                    Utc::now(),
                )
                .expect_err("blank comments");
            assert_eq!(err.kind, ErrorKind::MissingComments);
            assert_eq!(err.field.as_deref(), Some("comments"));
        }
    }

    #[test]
    fn test_patch_sets_review_fields() {
        let engine = WorkflowEngine::new();
        let admin = actor(ReviewerRole::Admin, true, false);
        let now = Utc::now();
        let patch = engine
            .transition(
                &project(ProjectStatus::UnderReview),
                Some(&admin),
                ProjectStatus::Approved,
                Some("  Solid plan  "),
                now,
            )
            .expect("approved");
        assert_eq!(patch.status, ProjectStatus::Approved);
        assert_eq!(patch.faculty_comments.as_deref(), Some("Solid plan"));
        assert_eq!(patch.reviewed_by, Some(admin.id));
        assert_eq!(patch.reviewed_at, Some(now));
        assert_eq!(patch.updated_at, now);
    }

    #[test]
    fn test_reset_to_pending_clears_review_fields() {
        let engine = WorkflowEngine::new();
        let editor = actor(ReviewerRole::Faculty, false, true);
        let mut p = project(ProjectStatus::Rejected);
        p.faculty_comments = Some("Needs a budget".into());
        let patch = engine
            .transition(&p, Some(&editor), ProjectStatus::Pending, None, Utc::now())
            .expect("reset");
        assert_eq!(patch.reviewed_by, None);
        assert_eq!(patch.reviewed_at, None);
        assert_eq!(patch.faculty_comments.as_deref(), Some("Needs a budget"));
    }

    #[test]
    fn test_completed_reversal_needs_edit() {
        let engine = WorkflowEngine::new();
        let approver = actor(ReviewerRole::Admin, true, false);
        let editor = actor(ReviewerRole::Admin, false, true);
        let done = project(ProjectStatus::Completed);

        let err = engine
            .transition(&done, Some(&approver), ProjectStatus::Pending, None, Utc::now())
            .expect_err("approve alone cannot reopen");
        assert_eq!(err.kind, ErrorKind::Authorization);

        assert!(
            engine
                .transition(&done, Some(&editor), ProjectStatus::Pending, None, Utc::now())
                .is_ok()
        );
    }

    #[test]
    fn test_super_admin_passes_every_gate_with_comments() {
        let engine = WorkflowEngine::new();
        let root = Actor::new(Uuid::new_v4(), ReviewerRole::SuperAdmin, PermissionBag::default());
        for from in ProjectStatus::ALL {
            for to in ProjectStatus::ALL {
                assert!(
                    engine
                        .transition(&project(from), Some(&root), to, Some("ok"), Utc::now())
                        .is_ok(),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn test_missing_actor_is_refused() {
        let engine = WorkflowEngine::new();
        let err = engine
            .transition(
                &project(ProjectStatus::Pending),
                None,
                ProjectStatus::UnderReview,
                None,
                Utc::now(),
            )
            .expect_err("anonymous");
        assert_eq!(err.kind, ErrorKind::Authorization);
    }
}
