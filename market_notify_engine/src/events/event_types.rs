use serde::{Deserialize, Serialize};

use crate::db_types::Notification;

/// Emitted after a brand-new notification row has been written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCreatedEvent {
    pub notification: Notification,
}

impl NotificationCreatedEvent {
    pub fn new(notification: Notification) -> Self {
        Self { notification }
    }
}

/// Emitted when a chat-message event was folded into an existing unread notification instead of
/// creating a new row. The payload carries the row as stored after the body rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCoalescedEvent {
    pub notification: Notification,
}

impl NotificationCoalescedEvent {
    pub fn new(notification: Notification) -> Self {
        Self { notification }
    }
}
