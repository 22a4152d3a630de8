//! The caller's own notification inbox.

use std::sync::Arc;

use uuid::Uuid;

use labhub_core::error::AppError;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_database::store::NotificationStore;
use labhub_entity::notification::model::Notification;

use crate::context::RequestContext;

/// Read and tidy notifications. Every call is scoped to the caller.
#[derive(Debug, Clone)]
pub struct InboxService {
    store: Arc<dyn NotificationStore>,
}

impl InboxService {
    /// Creates a new inbox service.
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Lists the caller's notifications, newest first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.store.find_by_user(ctx.user_id(), page).await
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.store.count_unread(ctx.user_id()).await
    }

    /// Marks one notification read. Marking an already read one is a no-op.
    pub async fn mark_read(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if self.store.mark_read(id, ctx.user_id()).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Notification {id} not found")))
        }
    }

    /// Marks all of the caller's notifications read.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.store.mark_all_read(ctx.user_id()).await
    }

    /// Deletes one notification.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if self.store.delete(id, ctx.user_id()).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Notification {id} not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labhub_core::error::ErrorKind;
    use labhub_database::memory::MemoryNotificationStore;
    use labhub_entity::notification::model::CreateNotification;

    #[tokio::test]
    async fn test_foreign_notification_is_not_found() {
        let store = MemoryNotificationStore::new();
        let inbox = InboxService::new(Arc::new(store.clone()));
        let owner = RequestContext::member(Uuid::new_v4());
        let stranger = RequestContext::member(Uuid::new_v4());

        let n = store
            .create(CreateNotification {
                user_id: owner.user_id(),
                project_id: None,
                title: "Project approved".into(),
                message: "Your project has been approved.".into(),
                link: None,
            })
            .await
            .expect("create");

        let err = inbox.mark_read(&stranger, n.id).await.expect_err("not theirs");
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = inbox.delete(&stranger, n.id).await.expect_err("not theirs");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(inbox.unread_count(&owner).await.expect("count"), 1);

        inbox.mark_read(&owner, n.id).await.expect("mark");
        assert_eq!(inbox.unread_count(&owner).await.expect("count"), 0);
        inbox.delete(&owner, n.id).await.expect("delete");
        let page = inbox.list(&owner, &PageRequest::default()).await.expect("list");
        assert!(page.items.is_empty());
    }
}
