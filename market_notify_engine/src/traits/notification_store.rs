use thiserror::Error;

use crate::{
    db_types::{DialogueId, NewNotification, Notification, UserId},
    notification_objects::NotificationQueryFilter,
};

#[derive(Debug, Clone, Error)]
pub enum NotificationStoreError {
    #[error("Internal database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for NotificationStoreError {
    fn from(e: sqlx::Error) -> Self {
        NotificationStoreError::DatabaseError(e.to_string())
    }
}

/// This trait defines the behaviour a backend must expose to support the notification engine.
///
/// This behaviour includes:
/// * Writing notification rows for order and chat events
/// * The coalescing write for chat-message notifications
/// * The read/delete lifecycle of the feed
#[allow(async_fn_in_trait)]
pub trait NotificationStore: Clone {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Unconditionally inserts a new notification row. Used for the non-coalescing kinds, where
    /// every event is a distinct business fact.
    async fn insert_notification(&self, new: NewNotification) -> Result<Notification, NotificationStoreError>;

    /// The coalescing write for `new_message` notifications.
    ///
    /// If the recipient already has an unread `new_message` notification for the same dialogue,
    /// its body is rewritten in place (title and `created_at` are untouched) and no new row is
    /// created. Otherwise a new row is inserted. The unread-uniqueness invariant is guaranteed by
    /// a partial unique index in the store, so two near-simultaneous messages cannot leave two
    /// unread rows behind.
    ///
    /// Returns the stored row and `true` if a fresh row was inserted, `false` if an existing row
    /// was coalesced into.
    async fn upsert_message_notification(
        &self,
        new: NewNotification,
    ) -> Result<(Notification, bool), NotificationStoreError>;

    /// Marks all unread `new_message` notifications for the given dialogue as read. Idempotent:
    /// returns the number of rows updated, which may be zero.
    async fn mark_dialogue_read(&self, user: UserId, dialogue: DialogueId) -> Result<u64, NotificationStoreError>;

    /// Deletes all `new_message` notifications for the given dialogue, read or unread. This
    /// deliberately bypasses the read-before-delete rule, since it accompanies deletion of the
    /// whole dialogue.
    async fn delete_dialogue_notifications(
        &self,
        user: UserId,
        dialogue: DialogueId,
    ) -> Result<u64, NotificationStoreError>;

    /// Number of unread notifications in the user's feed. Cheap enough to poll on every page load.
    async fn unread_count(&self, user: UserId) -> Result<i64, NotificationStoreError>;

    /// Marks a single notification as read. Returns `false` if the row does not exist or belongs
    /// to another user. Reads are monotonic: nothing ever sets `is_read` back to false.
    async fn mark_as_read(&self, user: UserId, id: i64) -> Result<bool, NotificationStoreError>;

    /// Marks all of the user's unread notifications as read. Returns the number of rows updated.
    async fn mark_all_read(&self, user: UserId) -> Result<u64, NotificationStoreError>;

    /// Deletes a single notification, but only if it has been read. Returns `false` (and leaves
    /// the row intact) if the row is unread, missing, or owned by another user.
    async fn delete_single(&self, user: UserId, id: i64) -> Result<bool, NotificationStoreError>;

    /// Deletes all of the user's read notifications, returning the number of rows removed.
    async fn delete_read(&self, user: UserId) -> Result<u64, NotificationStoreError>;

    /// Fetches the user's notifications, newest first, according to the given filter.
    async fn fetch_notifications(
        &self,
        user: UserId,
        filter: NotificationQueryFilter,
    ) -> Result<Vec<Notification>, NotificationStoreError>;
}
