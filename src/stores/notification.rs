use crate::errors::ApiError;
use crate::models::Notification;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// In-memory notification repository, scoped by recipient on every read.
#[derive(Clone, Default)]
pub struct NotificationStore {
    notifications: Arc<DashMap<Uuid, Notification>>,
}

impl NotificationStore {
    pub fn insert(&self, notification: Notification) {
        self.notifications.insert(notification.id, notification);
    }

    /// The recipient's notifications, newest first.
    pub fn for_user(&self, user_id: Uuid, unread_only: bool) -> Vec<Notification> {
        let mut items: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && (!unread_only || !n.read))
            .map(|entry| entry.clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        items
    }

    pub fn unread_count(&self, user_id: Uuid) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.read)
            .count()
    }

    /// Fetch a single notification, enforcing recipient ownership.
    pub fn get_owned(&self, id: &Uuid, caller: Uuid) -> Result<Notification, ApiError> {
        let notification = self
            .notifications
            .get(id)
            .ok_or(ApiError::NotFound("Notification"))?;
        if notification.user_id != caller {
            return Err(ApiError::Forbidden("You can only view your own notifications"));
        }
        Ok(notification.clone())
    }

    pub fn mark_read(&self, id: &Uuid, caller: Uuid) -> Result<Notification, ApiError> {
        let mut notification = self
            .notifications
            .get_mut(id)
            .ok_or(ApiError::NotFound("Notification"))?;
        if notification.user_id != caller {
            return Err(ApiError::Forbidden(
                "You can only modify your own notifications",
            ));
        }
        notification.read = true;
        Ok(notification.clone())
    }

    /// Mark every unread notification of the caller as read; returns how many
    /// were flipped.
    pub fn mark_all_read(&self, caller: Uuid) -> usize {
        let mut updated = 0;
        for mut entry in self.notifications.iter_mut() {
            if entry.user_id == caller && !entry.read {
                entry.read = true;
                updated += 1;
            }
        }
        updated
    }

    pub fn delete(&self, id: &Uuid, caller: Uuid) -> Result<(), ApiError> {
        let owner = self
            .notifications
            .get(id)
            .map(|n| n.user_id)
            .ok_or(ApiError::NotFound("Notification"))?;
        if owner != caller {
            return Err(ApiError::Forbidden(
                "You can only delete your own notifications",
            ));
        }
        self.notifications.remove(id);
        Ok(())
    }
}
