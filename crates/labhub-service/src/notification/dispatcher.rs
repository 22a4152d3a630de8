//! Decides and delivers the submitter notification for a transition.

use std::sync::Arc;

use tracing::{info, warn};

use labhub_core::config::NotificationConfig;
use labhub_database::store::NotificationStore;
use labhub_entity::notification::model::{CreateNotification, Notification};
use labhub_entity::project::{Project, ProjectStatus};

use super::mail::{MailMessage, MailSender};

/// Produces at most one notification per transition, for the submitter.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    mailer: Arc<dyn MailSender>,
    config: NotificationConfig,
    lab_name: String,
}

impl NotificationDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        mailer: Arc<dyn MailSender>,
        config: NotificationConfig,
        lab_name: String,
    ) -> Self {
        Self {
            store,
            mailer,
            config,
            lab_name,
        }
    }

    /// The notification a transition calls for, if any.
    ///
    /// Only approved, rejected and completed notify, and only when the
    /// status actually changed.
    pub fn plan(&self, project: &Project, previous: ProjectStatus) -> Option<CreateNotification> {
        let status = project.status;
        if status == previous || !status.notifies_submitter() {
            return None;
        }

        let title = format!("Project {}", status.label().to_lowercase());
        let mut message = match status {
            ProjectStatus::Approved => format!(
                "Your project \"{}\" has been approved.",
                project.project_title
            ),
            ProjectStatus::Rejected => format!(
                "Your project \"{}\" was not approved.",
                project.project_title
            ),
            _ => format!(
                "Your project \"{}\" has been marked as completed.",
                project.project_title
            ),
        };
        // Comments on a completed project belong to the earlier decision.
        let comments = project
            .faculty_comments
            .as_deref()
            .filter(|c| status.is_decision() && !c.is_empty());
        if let Some(comments) = comments {
            message.push_str(&format!(" Reviewer comments: {comments}"));
        }

        Some(CreateNotification {
            user_id: project.submitted_by,
            project_id: Some(project.id),
            title,
            message,
            link: Some(self.config.project_link(project.id)),
        })
    }

    /// Persist and email the notification for a committed transition.
    ///
    /// Persistence is attempted up to `delivery_attempts` times, so a retry
    /// after an ambiguous failure may store a duplicate. Every failure is
    /// logged and swallowed. Returns the stored notification.
    pub async fn notify_on_transition(
        &self,
        project: &Project,
        previous: ProjectStatus,
    ) -> Option<Notification> {
        let planned = self.plan(project, previous)?;

        let attempts = self.config.delivery_attempts.max(1);
        let mut stored = None;
        for attempt in 1..=attempts {
            match self.store.create(planned.clone()).await {
                Ok(n) => {
                    stored = Some(n);
                    break;
                }
                Err(e) => warn!(
                    project_id = %project.id,
                    attempt,
                    attempts,
                    error = %e,
                    "Failed to store notification"
                ),
            }
        }

        match &stored {
            Some(n) => info!(
                project_id = %project.id,
                user_id = %n.user_id,
                status = %project.status,
                "Submitter notified"
            ),
            None => warn!(
                project_id = %project.id,
                status = %project.status,
                "Giving up on in-app notification"
            ),
        }

        let mail = MailMessage {
            email: project.student_email.clone(),
            name: project.student_name.clone(),
            subject: format!("{}: {}", planned.title, project.project_title),
            body: format!("{}\n\n{}", planned.message, self.lab_name),
            email_type: project.status.as_str().to_string(),
            project_name: project.project_title.clone(),
        };
        if let Err(e) = self.mailer.send(&mail).await {
            warn!(project_id = %project.id, error = %e, "Status email not delivered");
        }

        stored
    }
}
