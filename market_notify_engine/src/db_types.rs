use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------       UserId        ---------------------------------------------------------
/// A lightweight wrapper around the marketplace's user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

//--------------------------------------     DialogueId      ---------------------------------------------------------
/// Identifier of a buyer–seller chat dialogue. Notifications only ever hold it as a weak reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct DialogueId(pub i64);

impl Display for DialogueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for DialogueId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

//--------------------------------------  NotificationKind   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// An order containing the recipient's products has been placed.
    NewOrder,
    /// The status of one of the recipient's orders has changed.
    OrderStatusChanged,
    /// A new chat message arrived. The only kind that coalesces per dialogue.
    NewMessage,
    /// Someone added one of the recipient's products to their favourites.
    ProductFavorited,
    /// A system announcement.
    System,
    /// An order has been cancelled by the counter-party.
    OrderCancelled,
}

impl NotificationKind {
    /// The fixed feed title for this kind of notification.
    pub fn title(&self) -> &'static str {
        match self {
            NotificationKind::NewOrder => "🎉 Новый заказ!",
            NotificationKind::OrderStatusChanged => "📦 Статус заказа изменен",
            NotificationKind::NewMessage => "💬 Новое сообщение",
            NotificationKind::ProductFavorited => "❤️ Товар добавлен в избранное",
            NotificationKind::System => "🔔 Системное уведомление",
            NotificationKind::OrderCancelled => "❌ Заказ отменен",
        }
    }
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::NewOrder => write!(f, "new_order"),
            NotificationKind::OrderStatusChanged => write!(f, "order_status_changed"),
            NotificationKind::NewMessage => write!(f, "new_message"),
            NotificationKind::ProductFavorited => write!(f, "product_favorited"),
            NotificationKind::System => write!(f, "system"),
            NotificationKind::OrderCancelled => write!(f, "order_cancelled"),
        }
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_else(|_| {
            error!("Invalid notification kind: {value}. But this conversion cannot fail. Defaulting to System");
            NotificationKind::System
        })
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid notification kind: {0}")]
pub struct KindConversionError(String);

impl FromStr for NotificationKind {
    type Err = KindConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new_order" => Ok(Self::NewOrder),
            "order_status_changed" => Ok(Self::OrderStatusChanged),
            "new_message" => Ok(Self::NewMessage),
            "product_favorited" => Ok(Self::ProductFavorited),
            "system" => Ok(Self::System),
            "order_cancelled" => Ok(Self::OrderCancelled),
            s => Err(KindConversionError(format!("Invalid notification kind: {s}"))),
        }
    }
}

//--------------------------------------    SubjectKind      ---------------------------------------------------------
/// What kind of business entity a notification points back at. Deliberately weak: the subject may
/// have been deleted since the notification was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Order,
    Dialogue,
    Product,
}

impl Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectKind::Order => write!(f, "order"),
            SubjectKind::Dialogue => write!(f, "dialogue"),
            SubjectKind::Product => write!(f, "product"),
        }
    }
}

//--------------------------------------    Notification     ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub subject_kind: Option<SubjectKind>,
    pub subject_id: Option<i64>,
    pub action_url: String,
}

//--------------------------------------  NewNotification    ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// The user who should see the notification in their feed.
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// Weak reference to the originating entity, used for coalescing lookups and links only.
    pub subject_kind: Option<SubjectKind>,
    pub subject_id: Option<i64>,
    /// Precomputed link for the UI to follow.
    pub action_url: String,
}

impl NewNotification {
    pub fn new<S: Into<String>>(recipient: UserId, kind: NotificationKind, body: S) -> Self {
        Self {
            recipient,
            kind,
            title: kind.title().to_string(),
            body: body.into(),
            subject_kind: None,
            subject_id: None,
            action_url: String::new(),
        }
    }

    pub fn for_subject(mut self, kind: SubjectKind, id: i64) -> Self {
        self.subject_kind = Some(kind);
        self.subject_id = Some(id);
        self
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_action_url<S: Into<String>>(mut self, url: S) -> Self {
        self.action_url = url.into();
        self
    }
}
