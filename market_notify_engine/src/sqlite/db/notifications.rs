use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{DialogueId, NewNotification, Notification, UserId},
    notification_objects::NotificationQueryFilter,
    traits::NotificationStoreError,
};

/// Inserts a notification row unconditionally. Non-coalescing kinds only; `new_message` rows must
/// go through [`coalesce_message_notification`] so the unread-uniqueness index is respected.
pub async fn insert_notification(
    new: NewNotification,
    conn: &mut SqliteConnection,
) -> Result<Notification, NotificationStoreError> {
    let notification: Notification = sqlx::query_as(
        r#"
            INSERT INTO notifications (
                recipient,
                kind,
                title,
                body,
                subject_kind,
                subject_id,
                action_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(new.recipient)
    .bind(new.kind)
    .bind(new.title)
    .bind(new.body)
    .bind(new.subject_kind)
    .bind(new.subject_id)
    .bind(new.action_url)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Notification #{} stored for user {}", notification.id, notification.recipient);
    Ok(notification)
}

/// The coalescing write for chat-message notifications.
///
/// First tries to rewrite the body of the recipient's unread notification for this dialogue,
/// leaving `title` and `created_at` untouched. If there is none, inserts a new row; the
/// `ON CONFLICT` clause piggybacks on the partial unique index so that a message racing in between
/// the two statements coalesces instead of failing.
pub async fn coalesce_message_notification(
    new: NewNotification,
    conn: &mut SqliteConnection,
) -> Result<(Notification, bool), NotificationStoreError> {
    let existing: Option<Notification> = sqlx::query_as(
        r#"
            UPDATE notifications
            SET body = 'Новое сообщение от ' || $1
            WHERE recipient = $2 AND kind = 'new_message' AND subject_id = $3 AND is_read = 0
            RETURNING *;
        "#,
    )
    .bind(new.body.clone())
    .bind(new.recipient)
    .bind(new.subject_id)
    .fetch_optional(&mut *conn)
    .await?;
    if let Some(notification) = existing {
        debug!("📝️ Notification #{} coalesced for user {}", notification.id, notification.recipient);
        return Ok((notification, false));
    }
    let notification: Notification = sqlx::query_as(
        r#"
            INSERT INTO notifications (
                recipient,
                kind,
                title,
                body,
                subject_kind,
                subject_id,
                action_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (recipient, kind, subject_id) WHERE kind = 'new_message' AND is_read = 0
            DO UPDATE SET body = 'Новое сообщение от ' || excluded.body
            RETURNING *;
        "#,
    )
    .bind(new.recipient)
    .bind(new.kind)
    .bind(new.title)
    .bind(new.body)
    .bind(new.subject_kind)
    .bind(new.subject_id)
    .bind(new.action_url)
    .fetch_one(conn)
    .await?;
    debug!("📝️ Notification #{} stored for user {}", notification.id, notification.recipient);
    Ok((notification, true))
}

/// Marks every unread `new_message` notification for the dialogue as read. A no-op when there is
/// nothing to mark.
pub async fn mark_dialogue_read(
    user: UserId,
    dialogue: DialogueId,
    conn: &mut SqliteConnection,
) -> Result<u64, NotificationStoreError> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = 1 WHERE recipient = $1 AND kind = 'new_message' AND subject_id = $2 AND \
         is_read = 0",
    )
    .bind(user)
    .bind(dialogue)
    .execute(conn)
    .await?;
    Ok(result.rows_affected())
}

/// Removes every `new_message` notification for the dialogue, read or unread.
pub async fn delete_dialogue_notifications(
    user: UserId,
    dialogue: DialogueId,
    conn: &mut SqliteConnection,
) -> Result<u64, NotificationStoreError> {
    let result =
        sqlx::query("DELETE FROM notifications WHERE recipient = $1 AND kind = 'new_message' AND subject_id = $2")
            .bind(user)
            .bind(dialogue)
            .execute(conn)
            .await?;
    Ok(result.rows_affected())
}

pub async fn unread_count(user: UserId, conn: &mut SqliteConnection) -> Result<i64, NotificationStoreError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE recipient = $1 AND is_read = 0")
        .bind(user)
        .fetch_one(conn)
        .await?;
    Ok(count)
}

/// Marks a single notification as read. The query is scoped to the acting user, so a foreign or
/// missing id simply updates nothing.
pub async fn mark_as_read(user: UserId, id: i64, conn: &mut SqliteConnection) -> Result<bool, NotificationStoreError> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = $1 AND recipient = $2")
        .bind(id)
        .bind(user)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn mark_all_read(user: UserId, conn: &mut SqliteConnection) -> Result<u64, NotificationStoreError> {
    let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE recipient = $1 AND is_read = 0")
        .bind(user)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Deletes a single notification, but only when it has already been read.
pub async fn delete_single(user: UserId, id: i64, conn: &mut SqliteConnection) -> Result<bool, NotificationStoreError> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient = $2 AND is_read = 1")
        .bind(id)
        .bind(user)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_read(user: UserId, conn: &mut SqliteConnection) -> Result<u64, NotificationStoreError> {
    let result = sqlx::query("DELETE FROM notifications WHERE recipient = $1 AND is_read = 1")
        .bind(user)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Fetches notifications for the feed according to the criteria in the `NotificationQueryFilter`.
///
/// Resulting notifications are ordered by `created_at` in descending order, newest first.
pub async fn fetch_notifications(
    user: UserId,
    filter: NotificationQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Notification>, NotificationStoreError> {
    let mut builder = QueryBuilder::new("SELECT * FROM notifications WHERE recipient = ");
    builder.push_bind(user);
    if filter.unread_only {
        builder.push(" AND is_read = 0");
    }
    if let Some(kind) = filter.kind {
        builder.push(" AND kind = ");
        builder.push_bind(kind.to_string());
    }
    builder.push(" ORDER BY created_at DESC, id DESC");
    if let Some(count) = filter.count {
        builder.push(" LIMIT ");
        builder.push_bind(count);
        if let Some(offset) = filter.offset {
            builder.push(" OFFSET ");
            builder.push_bind(offset);
        }
    }
    trace!("📝️ Executing query: {}", builder.sql());
    let query = builder.build_query_as::<Notification>();
    let notifications = query.fetch_all(conn).await?;
    trace!("📝️ Result of fetch_notifications: {:?}", notifications.len());
    Ok(notifications)
}
