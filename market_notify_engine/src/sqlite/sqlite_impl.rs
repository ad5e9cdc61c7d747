//! `SqliteDatabase` is a concrete implementation of a notification engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{new_pool, notifications};
use crate::{
    db_types::{DialogueId, NewNotification, Notification, UserId},
    notification_objects::NotificationQueryFilter,
    traits::{NotificationStore, NotificationStoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database API handle with the given maximum number of connections to the
    /// backing pool.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, NotificationStoreError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&mut self) -> Result<(), NotificationStoreError> {
        self.pool.close().await;
        Ok(())
    }
}

impl NotificationStore for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn insert_notification(&self, new: NewNotification) -> Result<Notification, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::insert_notification(new, &mut conn).await
    }

    /// The coalescing write runs both statements inside one transaction so that the rewrite probe
    /// and the fallback insert commit atomically.
    async fn upsert_message_notification(
        &self,
        new: NewNotification,
    ) -> Result<(Notification, bool), NotificationStoreError> {
        let mut tx = self.pool.begin().await?;
        let result = notifications::coalesce_message_notification(new, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn mark_dialogue_read(&self, user: UserId, dialogue: DialogueId) -> Result<u64, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::mark_dialogue_read(user, dialogue, &mut conn).await
    }

    async fn delete_dialogue_notifications(
        &self,
        user: UserId,
        dialogue: DialogueId,
    ) -> Result<u64, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::delete_dialogue_notifications(user, dialogue, &mut conn).await
    }

    async fn unread_count(&self, user: UserId) -> Result<i64, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::unread_count(user, &mut conn).await
    }

    async fn mark_as_read(&self, user: UserId, id: i64) -> Result<bool, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::mark_as_read(user, id, &mut conn).await
    }

    async fn mark_all_read(&self, user: UserId) -> Result<u64, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::mark_all_read(user, &mut conn).await
    }

    async fn delete_single(&self, user: UserId, id: i64) -> Result<bool, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::delete_single(user, id, &mut conn).await
    }

    async fn delete_read(&self, user: UserId) -> Result<u64, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::delete_read(user, &mut conn).await
    }

    async fn fetch_notifications(
        &self,
        user: UserId,
        filter: NotificationQueryFilter,
    ) -> Result<Vec<Notification>, NotificationStoreError> {
        let mut conn = self.pool.acquire().await?;
        notifications::fetch_notifications(user, filter, &mut conn).await
    }
}
