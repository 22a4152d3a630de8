//! In-memory project store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use labhub_core::error::AppError;
use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_entity::project::{Project, ProjectFilter, ReviewPatch};

use crate::store::ProjectStore;

/// Project storage held in process memory.
///
/// The write lock is held across the version compare and the write, so
/// conditional writes on one project are serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryProjectStore {
    projects: Arc<RwLock<HashMap<Uuid, Project>>>,
}

impl MemoryProjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectStore for MemoryProjectStore {
    async fn create(&self, project: &Project) -> AppResult<Project> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(AppError::conflict(format!(
                "Project {} already exists",
                project.id
            )));
        }
        projects.insert(project.id, project.clone());
        Ok(project.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Project>> {
        Ok(self.projects.read().await.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &ProjectFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Project>> {
        let projects = self.projects.read().await;
        let mut matching: Vec<Project> = projects
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(PageResponse::from_vec(matching, page))
    }

    async fn write_conditional(
        &self,
        id: Uuid,
        expected_version: i64,
        patch: &ReviewPatch,
    ) -> AppResult<Project> {
        let mut projects = self.projects.write().await;
        let current = projects
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))?;

        if current.version != expected_version {
            debug!(
                project_id = %id,
                expected_version,
                stored_version = current.version,
                "Conditional write lost the race"
            );
            return Err(AppError::conflict(
                "Project was modified concurrently; reload it and try again",
            ));
        }

        let updated = current.with_patch(patch);
        projects.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.projects.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use labhub_core::error::ErrorKind;
    use labhub_entity::project::{ProjectDraft, ProjectStatus, validate};

    fn project(email: &str) -> Project {
        let draft = ProjectDraft {
            student_name: Some("Asha Rao".into()),
            student_email: Some(email.into()),
            roll_number: Some("21CS042".into()),
            branch: Some("CSE".into()),
            year: Some("3".into()),
            category: Some("robotics".into()),
            project_title: Some("Line follower".into()),
            description: Some("PID tuned line follower".into()),
            duration: Some("8 weeks".into()),
            ..ProjectDraft::default()
        };
        validate(&draft)
            .expect("draft is valid")
            .into_project(Uuid::new_v4(), Utc::now())
    }

    fn patch(status: ProjectStatus) -> ReviewPatch {
        let now = Utc::now();
        ReviewPatch {
            status,
            faculty_comments: Some("ok".into()),
            reviewed_by: Some(Uuid::new_v4()),
            reviewed_at: Some(now),
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_conditional_write_bumps_version() {
        let store = MemoryProjectStore::new();
        let p = store.create(&project("a@lab.edu")).await.expect("create");

        let updated = store
            .write_conditional(p.id, 1, &patch(ProjectStatus::UnderReview))
            .await
            .expect("write");
        assert_eq!(updated.version, 2);
        assert_eq!(updated.status, ProjectStatus::UnderReview);

        let stale = store
            .write_conditional(p.id, 1, &patch(ProjectStatus::Approved))
            .await
            .expect_err("stale version");
        assert_eq!(stale.kind, ErrorKind::Conflict);

        let stored = store.find_by_id(p.id).await.expect("read").expect("exists");
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_conditional_write_missing_project() {
        let store = MemoryProjectStore::new();
        let err = store
            .write_conditional(Uuid::new_v4(), 1, &patch(ProjectStatus::Approved))
            .await
            .expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_concurrent_writes_on_same_version() {
        let store = MemoryProjectStore::new();
        let p = store.create(&project("a@lab.edu")).await.expect("create");

        let first = store.clone();
        let second = store.clone();
        let approve = patch(ProjectStatus::Approved);
        let reject = patch(ProjectStatus::Rejected);
        let (a, b) = futures::join!(
            first.write_conditional(p.id, p.version, &approve),
            second.write_conditional(p.id, p.version, &reject),
        );

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        let loser = outcomes
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("one write fails");
        assert_eq!(loser.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let store = MemoryProjectStore::new();
        let mut older = project("asha@lab.edu");
        older.created_at = Utc::now() - Duration::hours(2);
        let newer = project("ASHA@lab.edu");
        let other = project("ravi@lab.edu");
        for p in [&older, &newer, &other] {
            store.create(p).await.expect("create");
        }

        let filter = ProjectFilter {
            submitter_email: Some("asha@lab.edu".into()),
            ..ProjectFilter::default()
        };
        let page = store
            .list(&filter, &PageRequest::default())
            .await
            .expect("list");
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].id, newer.id);
        assert_eq!(page.items[1].id, older.id);

        let approved = ProjectFilter {
            status: Some(ProjectStatus::Approved),
            ..ProjectFilter::default()
        };
        let page = store
            .list(&approved, &PageRequest::default())
            .await
            .expect("list");
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryProjectStore::new();
        let p = store.create(&project("a@lab.edu")).await.expect("create");
        assert!(store.delete(p.id).await.expect("delete"));
        assert!(!store.delete(p.id).await.expect("delete again"));
        assert!(store.find_by_id(p.id).await.expect("read").is_none());
    }
}
