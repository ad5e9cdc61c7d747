use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Notification, UserId},
    mne_api::errors::NotificationApiError,
    notification_objects::NotificationQueryFilter,
    traits::NotificationStore,
};

/// `FeedApi` serves the notification feed, the unread-count badge, and the explicit read/delete
/// actions a user takes on their own notifications. Unlike [`crate::DispatchApi`], these
/// operations were requested by the user, so store failures propagate to the caller.
pub struct FeedApi<B> {
    db: B,
}

impl<B> Debug for FeedApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FeedApi")
    }
}

impl<B> FeedApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}

impl<B> FeedApi<B>
where B: NotificationStore
{
    /// The user's notifications, newest first.
    pub async fn feed(
        &self,
        user: UserId,
        filter: NotificationQueryFilter,
    ) -> Result<Vec<Notification>, NotificationApiError> {
        let notifications = self.db.fetch_notifications(user, filter).await?;
        trace!("📋️ Fetched {} notifications for user {user}", notifications.len());
        Ok(notifications)
    }

    pub async fn unread_count(&self, user: UserId) -> Result<i64, NotificationApiError> {
        let count = self.db.unread_count(user).await?;
        Ok(count)
    }

    /// Marks one notification read. Returns `false` when the id does not resolve to one of the
    /// user's own rows. Reads are monotonic; there is no way back to unread.
    pub async fn mark_as_read(&self, user: UserId, id: i64) -> Result<bool, NotificationApiError> {
        let marked = self.db.mark_as_read(user, id).await?;
        if !marked {
            debug!("📋️ Notification #{id} was not marked read for user {user} (missing or foreign)");
        }
        Ok(marked)
    }

    pub async fn mark_all_read(&self, user: UserId) -> Result<u64, NotificationApiError> {
        let count = self.db.mark_all_read(user).await?;
        debug!("📋️ Marked {count} notifications read for user {user}");
        Ok(count)
    }

    /// Deletes one notification if, and only if, it has already been read. Returns `false` and
    /// leaves the row alone otherwise; the caller decides how to surface that.
    pub async fn delete_single(&self, user: UserId, id: i64) -> Result<bool, NotificationApiError> {
        let deleted = self.db.delete_single(user, id).await?;
        if !deleted {
            debug!("📋️ Notification #{id} was not deleted for user {user} (unread, missing, or foreign)");
        }
        Ok(deleted)
    }

    /// Clears all read notifications out of the feed, returning how many were removed.
    pub async fn delete_read(&self, user: UserId) -> Result<u64, NotificationApiError> {
        let count = self.db.delete_read(user).await?;
        debug!("📋️ Deleted {count} read notifications for user {user}");
        Ok(count)
    }
}
