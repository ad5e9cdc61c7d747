use mns_common::Kopeks;
use serde::{Deserialize, Serialize};

use crate::db_types::{DialogueId, NotificationKind, UserId};

//----------------------------------- NotificationQueryFilter --------------------------------------------------------
/// Filter criteria for fetching a user's notification feed. The feed is always newest-first; the
/// filter narrows and pages it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQueryFilter {
    #[serde(default)]
    pub unread_only: bool,
    pub kind: Option<NotificationKind>,
    pub offset: Option<i64>,
    pub count: Option<i64>,
}

impl NotificationQueryFilter {
    pub fn unread_only(mut self) -> Self {
        self.unread_only = true;
        self
    }

    pub fn with_kind(mut self, kind: NotificationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn paged(mut self, offset: i64, count: i64) -> Self {
        self.offset = Some(offset);
        self.count = Some(count);
        self
    }
}

//--------------------------------------      UserRef        ---------------------------------------------------------
/// The slice of a user the notification texts need: the id for scoping, the email for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub email: String,
}

impl UserRef {
    pub fn new<S: Into<String>>(id: UserId, email: S) -> Self {
        Self { id, email: email.into() }
    }
}

//--------------------------------------     OrderLine       ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub seller: UserRef,
    pub title: String,
    pub price: Kopeks,
    pub quantity: i64,
}

//--------------------------------------    OrderPlaced      ---------------------------------------------------------
/// A placed order, as reported by the order subsystem after it has persisted the order rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: i64,
    pub buyer: UserRef,
    pub lines: Vec<OrderLine>,
}

impl OrderPlaced {
    /// The sellers represented in this order's line items, first occurrence order, no duplicates.
    pub fn distinct_sellers(&self) -> Vec<&UserRef> {
        let mut seen: Vec<UserId> = Vec::new();
        let mut sellers = Vec::new();
        for line in &self.lines {
            if !seen.contains(&line.seller.id) {
                seen.push(line.seller.id);
                sellers.push(&line.seller);
            }
        }
        sellers
    }

    /// The item titles (up to [`crate::DispatchApi`]'s display limit, with an "и ещё N товаров"
    /// tail) and the summed price of this seller's lines only.
    pub fn summary_for_seller(&self, seller: UserId, titles_shown: usize) -> (String, Kopeks) {
        let lines: Vec<&OrderLine> = self.lines.iter().filter(|l| l.seller.id == seller).collect();
        let mut titles =
            lines.iter().take(titles_shown).map(|l| l.title.as_str()).collect::<Vec<_>>().join(", ");
        if lines.len() > titles_shown {
            titles.push_str(&format!(" и ещё {} товаров", lines.len() - titles_shown));
        }
        let total = lines.iter().map(|l| l.price * l.quantity).sum();
        (titles, total)
    }
}

//-------------------------------------- BuyerCancellation   ---------------------------------------------------------
/// An order cancelled by its buyer; each seller with items in the order gets told.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyerCancellation {
    pub order_id: i64,
    pub buyer: UserRef,
    pub sellers: Vec<UserRef>,
}

//-------------------------------------- SellerCancellation  ---------------------------------------------------------
/// An order cancelled by a seller; the buyer gets told who cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerCancellation {
    pub order_id: i64,
    pub buyer: UserRef,
    pub seller: UserRef,
}

//--------------------------------------    MessageSent      ---------------------------------------------------------
/// A chat message, reported by the chat subsystem after the message row was persisted. The caller
/// is responsible for not reporting messages a user sends to themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSent {
    pub dialogue_id: DialogueId,
    pub sender: UserRef,
    pub recipient: UserId,
    pub text: String,
}

//-------------------------------------- DialogueDeleted     ---------------------------------------------------------
/// A dialogue was deleted outright; notifications for both participants go with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueDeleted {
    pub dialogue_id: DialogueId,
    pub user1: UserId,
    pub user2: UserId,
}
