use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{DialogueId, NewNotification, Notification, NotificationKind, SubjectKind, UserId},
    events::{EventProducers, NotificationCoalescedEvent, NotificationCreatedEvent},
    helpers::truncate_for_display,
    mne_api::best_effort,
    notification_objects::{BuyerCancellation, DialogueDeleted, MessageSent, OrderPlaced, SellerCancellation, UserRef},
    traits::NotificationStore,
};

/// Maximum number of characters of a chat message shown in the notification body.
const MESSAGE_PREVIEW_CHARS: usize = 100;
/// How many item titles a new-order notification lists before collapsing the rest into a count.
const ORDER_TITLES_SHOWN: usize = 3;

/// `DispatchApi` is the primary entry point for business events that produce notifications: order
/// placement, order cancellation, chat messages, and the dialogue open/delete housekeeping that
/// retires chat notifications.
///
/// Every public operation here is best-effort. The order or message the caller just persisted must
/// not fail because a notification row could not be written, so store errors are logged and
/// reported as falsy results.
pub struct DispatchApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for DispatchApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DispatchApi")
    }
}

impl<B> DispatchApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }
}

impl<B> DispatchApi<B>
where B: NotificationStore
{
    /// Fans a placed order out to its sellers: one `new_order` notification per distinct seller,
    /// listing that seller's items and the summed price of that seller's lines only.
    ///
    /// Sellers who are also the buyer are skipped; the order subsystem removes own-product lines
    /// before checkout, and this is the second line of defence.
    ///
    /// Returns the number of sellers notified.
    pub async fn order_placed(&self, order: &OrderPlaced) -> usize {
        let mut notified = 0;
        for seller in order.distinct_sellers() {
            if seller.id == order.buyer.id {
                debug!("🔔️ Order #{}: seller {} is the buyer, not notifying", order.order_id, seller.id);
                continue;
            }
            let (titles, total) = order.summary_for_seller(seller.id, ORDER_TITLES_SHOWN);
            let body = format!(
                "Покупатель {} оформил заказ на ваши товары: {titles}. Общая сумма: {total}.",
                order.buyer.email
            );
            let new = NewNotification::new(seller.id, NotificationKind::NewOrder, body)
                .for_subject(SubjectKind::Order, order.order_id)
                .with_action_url("/orders/sales/");
            if let Some(n) = best_effort("order notification", self.db.insert_notification(new).await) {
                self.call_created_hook(&n).await;
                notified += 1;
            }
        }
        debug!("🔔️📦️ Order #{} dispatched. {notified} sellers notified", order.order_id);
        notified
    }

    /// Records a chat message in the recipient's feed, coalescing with any unread notification for
    /// the same dialogue so the feed shows at most one "new message" entry per conversation.
    pub async fn message_sent(&self, message: &MessageSent) -> bool {
        let preview = truncate_for_display(&message.text, MESSAGE_PREVIEW_CHARS);
        let body = format!("{}: {preview}", message.sender.email);
        let new = NewNotification::new(message.recipient, NotificationKind::NewMessage, body)
            .for_subject(SubjectKind::Dialogue, message.dialogue_id.0)
            .with_action_url(format!("/chat/dialogue/{}/", message.dialogue_id));
        match best_effort("message notification", self.db.upsert_message_notification(new).await) {
            Some((n, true)) => {
                self.call_created_hook(&n).await;
                true
            },
            Some((n, false)) => {
                self.call_coalesced_hook(&n).await;
                true
            },
            None => false,
        }
    }

    /// A user opened a dialogue: retire its unread chat notifications. Idempotent.
    pub async fn dialogue_opened(&self, user: UserId, dialogue: DialogueId) -> bool {
        let marked = best_effort("mark dialogue read", self.db.mark_dialogue_read(user, dialogue).await);
        if let Some(count) = marked {
            trace!("🔔️💬️ Dialogue {dialogue}: {count} notifications marked read for user {user}");
        }
        marked.is_some()
    }

    /// A dialogue was deleted outright: remove its chat notifications for both participants, read
    /// and unread alike.
    pub async fn dialogue_deleted(&self, deleted: &DialogueDeleted) -> bool {
        let mut ok = true;
        for user in [deleted.user1, deleted.user2] {
            let removed = best_effort(
                "delete dialogue notifications",
                self.db.delete_dialogue_notifications(user, deleted.dialogue_id).await,
            );
            match removed {
                Some(count) => {
                    trace!("🔔️💬️ Dialogue {}: {count} notifications removed for user {user}", deleted.dialogue_id)
                },
                None => ok = false,
            }
        }
        ok
    }

    /// The buyer cancelled an order: each seller with items in it gets one `order_cancelled`
    /// notification naming the buyer. Returns the number of sellers notified.
    pub async fn order_cancelled_by_buyer(&self, cancellation: &BuyerCancellation) -> usize {
        let mut notified = 0;
        let body =
            format!("Покупатель {} отменил заказ #{}", cancellation.buyer.email, cancellation.order_id);
        for seller in distinct_users(&cancellation.sellers) {
            if seller.id == cancellation.buyer.id {
                continue;
            }
            let new = NewNotification::new(seller.id, NotificationKind::OrderCancelled, body.clone())
                .for_subject(SubjectKind::Order, cancellation.order_id)
                .with_action_url("/orders/sales/");
            if let Some(n) = best_effort("cancellation notification", self.db.insert_notification(new).await) {
                self.call_created_hook(&n).await;
                notified += 1;
            }
        }
        debug!("🔔️❌️ Order #{} cancellation dispatched to {notified} sellers", cancellation.order_id);
        notified
    }

    /// A seller cancelled an order: the buyer gets one `order_cancelled` notification naming the
    /// seller.
    pub async fn order_cancelled_by_seller(&self, cancellation: &SellerCancellation) -> bool {
        if cancellation.buyer.id == cancellation.seller.id {
            debug!("🔔️❌️ Order #{}: seller cancelled their own order, not notifying", cancellation.order_id);
            return false;
        }
        let body =
            format!("Мастер {} отменил ваш заказ #{}", cancellation.seller.email, cancellation.order_id);
        let new = NewNotification::new(cancellation.buyer.id, NotificationKind::OrderCancelled, body)
            .with_title("❌ Заказ отменен мастером")
            .for_subject(SubjectKind::Order, cancellation.order_id)
            .with_action_url("/orders/purchases/");
        match best_effort("cancellation notification", self.db.insert_notification(new).await) {
            Some(n) => {
                self.call_created_hook(&n).await;
                true
            },
            None => false,
        }
    }

    async fn call_created_hook(&self, notification: &Notification) {
        for producer in &self.producers.notification_created_producer {
            let event = NotificationCreatedEvent::new(notification.clone());
            producer.publish_event(event).await;
        }
    }

    async fn call_coalesced_hook(&self, notification: &Notification) {
        for producer in &self.producers.notification_coalesced_producer {
            let event = NotificationCoalescedEvent::new(notification.clone());
            producer.publish_event(event).await;
        }
    }
}

fn distinct_users(users: &[UserRef]) -> Vec<&UserRef> {
    let mut seen: Vec<UserId> = Vec::new();
    let mut result = Vec::new();
    for user in users {
        if !seen.contains(&user.id) {
            seen.push(user.id);
            result.push(user);
        }
    }
    result
}
