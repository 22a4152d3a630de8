//! # labhub-service
//!
//! The review workflow and the services around it. Every service receives
//! its collaborators as `Arc` handles at construction time.
//!
//! [`ReviewCoordinator`] is the single entry point for status changes; it
//! runs the [`WorkflowEngine`], persists the result with a conditional
//! write, then records the audit entry and notifies the submitter.

pub mod audit;
pub mod context;
pub mod notification;
pub mod project;
pub mod review;
pub mod workflow;

use std::sync::Arc;

use labhub_core::config::AppConfig;
use labhub_database::Stores;

pub use audit::AuditRecorder;
pub use context::RequestContext;
pub use notification::{
    HttpMailSender, InboxService, LogMailSender, MailMessage, MailSender, NotificationDispatcher,
};
pub use project::ProjectService;
pub use review::{ReviewCoordinator, ReviewRequest};
pub use workflow::{TransitionRule, TransitionTable, WorkflowEngine};

/// Every service wired against one set of stores.
#[derive(Debug, Clone)]
pub struct Services {
    /// Status transitions.
    pub review: ReviewCoordinator,
    /// Submission, lookup, listing and deletion.
    pub projects: ProjectService,
    /// The caller's notification inbox.
    pub inbox: InboxService,
    /// Audit trail access.
    pub audit: AuditRecorder,
}

impl Services {
    /// Wire the services from stores, configuration and a mail sender.
    pub fn new(stores: &Stores, config: &AppConfig, mailer: Arc<dyn MailSender>) -> Self {
        let audit = AuditRecorder::new(Arc::clone(&stores.audit));
        let dispatcher = NotificationDispatcher::new(
            Arc::clone(&stores.notifications),
            Arc::clone(&mailer),
            config.notifications.clone(),
            config.mail.lab_name.clone(),
        );
        let review = ReviewCoordinator::new(
            Arc::clone(&stores.projects),
            WorkflowEngine::new(),
            audit.clone(),
            dispatcher,
            config.workflow.clone(),
        );
        let projects = ProjectService::new(
            Arc::clone(&stores.projects),
            audit.clone(),
            mailer,
            config.mail.lab_name.clone(),
        );
        let inbox = InboxService::new(Arc::clone(&stores.notifications));

        Self {
            review,
            projects,
            inbox,
            audit,
        }
    }
}
