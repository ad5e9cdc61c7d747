use std::fmt::Display;

use market_notify_engine::{
    db_types::{DialogueId, NotificationKind, UserId},
    notification_objects::NotificationQueryFilter,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// The bare `{"success": bool}` body the storefront's notification widget expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl From<bool> for SuccessResponse {
    fn from(success: bool) -> Self {
        Self { success }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub success: bool,
    pub deleted_count: u64,
}

/// Query parameters of the feed route.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedParams {
    pub offset: Option<i64>,
    pub count: Option<i64>,
    #[serde(default)]
    pub unread: bool,
    pub kind: Option<NotificationKind>,
}

impl FeedParams {
    pub fn into_filter(self) -> NotificationQueryFilter {
        NotificationQueryFilter { unread_only: self.unread, kind: self.kind, offset: self.offset, count: self.count }
    }
}

/// Body of the dialogue-opened trigger: the chat subsystem reports which user opened which
/// dialogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueOpenedParams {
    pub user: UserId,
    pub dialogue_id: DialogueId,
}
