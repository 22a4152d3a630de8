//! In-memory notification store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use labhub_core::result::AppResult;
use labhub_core::types::pagination::{PageRequest, PageResponse};
use labhub_entity::notification::model::{CreateNotification, Notification};

use crate::store::NotificationStore;

/// Notifications held in process memory, in creation order.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl MemoryNotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored notification, across all users.
    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, data: CreateNotification) -> AppResult<Notification> {
        let notification = data.into_notification(Utc::now());
        self.notifications.write().await.push(notification.clone());
        Ok(notification)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let notifications = self.notifications.read().await;
        let owned: Vec<Notification> = notifications
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        Ok(PageResponse::from_vec(owned, page))
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        let notifications = self.notifications.read().await;
        Ok(notifications
            .iter()
            .filter(|n| n.user_id == user_id && n.is_unread())
            .count() as i64)
    }

    async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut notifications = self.notifications.write().await;
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(n) => {
                n.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<u64> {
        let mut notifications = self.notifications.write().await;
        let mut changed = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && n.is_unread())
        {
            n.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut notifications = self.notifications.write().await;
        let before = notifications.len();
        notifications.retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(notifications.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(user_id: Uuid, title: &str) -> CreateNotification {
        CreateNotification {
            user_id,
            project_id: None,
            title: title.to_string(),
            message: "body".to_string(),
            link: None,
        }
    }

    #[tokio::test]
    async fn test_mutations_scoped_to_owner() {
        let store = MemoryNotificationStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let a = store.create(note(alice, "a1")).await.expect("create");
        store.create(note(alice, "a2")).await.expect("create");
        let b = store.create(note(bob, "b1")).await.expect("create");

        assert!(!store.mark_read(b.id, alice).await.expect("mark"));
        assert!(!store.delete(b.id, alice).await.expect("delete"));
        assert_eq!(store.count_unread(bob).await.expect("count"), 1);

        assert!(store.mark_read(a.id, alice).await.expect("mark"));
        assert_eq!(store.count_unread(alice).await.expect("count"), 1);
        assert_eq!(store.mark_all_read(alice).await.expect("mark all"), 1);
        assert_eq!(store.count_unread(alice).await.expect("count"), 0);
        assert_eq!(store.count_unread(bob).await.expect("count"), 1);

        let page = store
            .find_by_user(alice, &PageRequest::default())
            .await
            .expect("list");
        assert_eq!(page.total_items, 2);
        assert_eq!(page.items[0].title, "a2");
    }
}
