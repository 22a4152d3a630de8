//! Shared fixtures for the workflow tests: memory stores, a recording
//! mailer, and stores that fail on demand.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use labhub_core::config::{AppConfig, DatabaseConfig};
use labhub_core::error::AppError;
use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_database::Stores;
use labhub_database::memory::{
    MemoryAuditLogStore, MemoryNotificationStore, MemoryProjectStore, MemoryReviewerStore,
};
use labhub_database::store::{AuditLogStore, AuditQuery, NotificationStore, ProjectStore};
use labhub_entity::audit::model::{AuditLogEntry, CreateAuditLogEntry};
use labhub_entity::notification::model::{CreateNotification, Notification};
use labhub_entity::project::{Project, ProjectDraft, ProjectFilter, ProjectStatus, ReviewPatch};
use labhub_entity::reviewer::{Actor, PermissionBag, ReviewerRole};
use labhub_service::{MailMessage, MailSender, RequestContext, Services};

/// Captures every message instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<MailMessage>>,
}

#[async_trait]
impl MailSender for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

/// Mailer whose service is always down.
#[derive(Debug, Default)]
pub struct DownMailer;

#[async_trait]
impl MailSender for DownMailer {
    async fn send(&self, _message: &MailMessage) -> AppResult<()> {
        Err(AppError::external_service("Mail service unreachable"))
    }
}

/// Audit store that rejects every append.
#[derive(Debug, Default)]
pub struct BrokenAuditStore;

#[async_trait]
impl AuditLogStore for BrokenAuditStore {
    async fn append(&self, _entry: CreateAuditLogEntry) -> AppResult<AuditLogEntry> {
        Err(AppError::persistence("audit table unavailable"))
    }

    async fn search(
        &self,
        _query: &AuditQuery,
        page: &PageRequest,
    ) -> AppResult<PageResponse<AuditLogEntry>> {
        Ok(PageResponse::new(Vec::new(), page, 0))
    }
}

/// Notification store that fails a fixed number of creates first.
#[derive(Debug)]
pub struct FlakyNotificationStore {
    pub inner: MemoryNotificationStore,
    pub failures_left: AtomicU32,
    pub calls: AtomicU32,
}

impl FlakyNotificationStore {
    pub fn new(failures: u32) -> Self {
        Self {
            inner: MemoryNotificationStore::new(),
            failures_left: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl NotificationStore for FlakyNotificationStore {
    async fn create(&self, data: CreateNotification) -> AppResult<Notification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(AppError::persistence("notification table unavailable"));
        }
        self.inner.create(data).await
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.inner.find_by_user(user_id, page).await
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        self.inner.count_unread(user_id).await
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        self.inner.mark_read(id, user_id).await
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        self.inner.mark_all_read(user_id).await
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        self.inner.delete(id, user_id).await
    }
}

/// How a [`FaultyProjectStore`] misbehaves on the write path.
#[derive(Debug, Clone)]
pub enum WriteFault {
    /// Every conditional write fails as if the database were down.
    Unavailable,
    /// Another reviewer commits this patch right after each read.
    Interleave(ReviewPatch),
}

/// Memory project store with an injected write fault.
#[derive(Debug)]
pub struct FaultyProjectStore {
    pub inner: MemoryProjectStore,
    pub fault: WriteFault,
}

#[async_trait]
impl ProjectStore for FaultyProjectStore {
    async fn create(&self, project: &Project) -> AppResult<Project> {
        self.inner.create(project).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        let read = self.inner.find_by_id(id).await?;
        if let (WriteFault::Interleave(patch), Some(p)) = (&self.fault, &read) {
            self.inner.write_conditional(id, p.version, patch).await?;
        }
        Ok(read)
    }

    async fn list(
        &self,
        filter: &ProjectFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        self.inner.list(filter, page).await
    }

    async fn write_conditional(
        &self,
        id: Uuid,
        expected_version: i64,
        patch: &ReviewPatch,
    ) -> AppResult<Project> {
        match self.fault {
            WriteFault::Unavailable => Err(AppError::persistence("database unavailable")),
            WriteFault::Interleave(_) => {
                self.inner.write_conditional(id, expected_version, patch).await
            }
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        self.inner.delete(id).await
    }
}

/// Memory-backed services plus direct handles on each store.
pub struct Harness {
    pub services: Services,
    pub projects: MemoryProjectStore,
    pub audit: MemoryAuditLogStore,
    pub notifications: MemoryNotificationStore,
    pub mailer: Arc<RecordingMailer>,
}

pub fn config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "postgres://localhost/labhub_test".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
            auto_migrate: false,
        },
        logging: Default::default(),
        mail: Default::default(),
        notifications: Default::default(),
        workflow: Default::default(),
    }
}

pub fn harness() -> Harness {
    let projects = MemoryProjectStore::new();
    let audit = MemoryAuditLogStore::new();
    let notifications = MemoryNotificationStore::new();
    let mailer = Arc::new(RecordingMailer::default());
    let stores = Stores {
        projects: Arc::new(projects.clone()),
        audit: Arc::new(audit.clone()),
        notifications: Arc::new(notifications.clone()),
        reviewers: Arc::new(MemoryReviewerStore::new()),
    };
    let services = Services::new(&stores, &config(), mailer.clone());
    Harness {
        services,
        projects,
        audit,
        notifications,
        mailer,
    }
}

pub fn draft() -> ProjectDraft {
    ProjectDraft {
        student_name: Some("Asha Rao".into()),
        student_email: Some("asha.rao@college.edu".into()),
        roll_number: Some("21CS042".into()),
        branch: Some("Computer Science".into()),
        year: Some("3rd".into()),
        contact_number: Some("+91 98450 00000".into()),
        category: Some("robotics".into()),
        project_title: Some("Autonomous line follower".into()),
        description: Some("A PID-tuned robot that follows a taped track".into()),
        expected_outcomes: Some("Working prototype and report".into()),
        duration: Some("8 weeks".into()),
        required_resources: vec!["Arduino Uno".into(), "IR sensor array".into()],
        ..ProjectDraft::default()
    }
}

pub fn reviewer(role: ReviewerRole, can_approve: bool, can_edit: bool, can_delete: bool) -> RequestContext {
    RequestContext::new(Actor::new(
        Uuid::new_v4(),
        role,
        PermissionBag {
            can_approve,
            can_edit,
            can_delete,
        },
    ))
}

pub fn super_admin() -> RequestContext {
    reviewer(ReviewerRole::SuperAdmin, false, false, false)
}

/// Submit the default draft and force it into `status` through the store.
pub async fn seeded(h: &Harness, status: ProjectStatus) -> Project {
    let student = RequestContext::member(Uuid::new_v4());
    let project = h
        .services
        .projects
        .submit(&student, &draft())
        .await
        .expect("submit");
    if status == ProjectStatus::Pending {
        return project;
    }
    let now = chrono::Utc::now();
    let patch = ReviewPatch {
        status,
        faculty_comments: Some("seeded".into()),
        reviewed_by: Some(Uuid::new_v4()),
        reviewed_at: Some(now),
        updated_at: now,
    };
    h.projects
        .write_conditional(project.id, project.version, &patch)
        .await
        .expect("seed status")
}

/// Audit entries excluding the submission record.
pub async fn transition_entries(h: &Harness) -> Vec<AuditLogEntry> {
    h.audit
        .entries()
        .await
        .into_iter()
        .filter(|e| e.action != "project.submitted")
        .collect()
}
