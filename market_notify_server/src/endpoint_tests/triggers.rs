use actix_web::test::{self, TestRequest};
use market_notify_engine::{
    db_types::{DialogueId, Notification, NotificationKind, UserId},
    notification_objects::{DialogueDeleted, MessageSent, OrderLine, OrderPlaced, SellerCancellation, UserRef},
};
use mns_common::Kopeks;

use crate::{
    auth::USER_ID_HEADER,
    data_objects::{DialogueOpenedParams, JsonResponse, UnreadCountResponse},
    endpoint_tests::{test_app, test_db},
};

fn two_seller_order() -> OrderPlaced {
    OrderPlaced {
        order_id: 12,
        buyer: UserRef::new(UserId(100), "buyer@market.ru"),
        lines: vec![
            OrderLine {
                seller: UserRef::new(UserId(1), "vera@market.ru"),
                title: "Ваза".to_string(),
                price: Kopeks::from_rubles(1500),
                quantity: 1,
            },
            OrderLine {
                seller: UserRef::new(UserId(2), "oleg@market.ru"),
                title: "Брошь".to_string(),
                price: Kopeks::from_rubles(700),
                quantity: 2,
            },
        ],
    }
}

#[actix_web::test]
async fn placed_orders_fan_out_to_sellers() {
    let db = test_db().await;
    let app = test_app!(db);
    let req = TestRequest::post().uri("/events/order-placed").set_json(two_seller_order()).to_request();
    let resp: JsonResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);
    assert_eq!(resp.message, "2 sellers notified");

    let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, "1")).to_request();
    let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, NotificationKind::NewOrder);
    assert!(feed[0].body.contains("Ваза"));
    assert!(!feed[0].body.contains("Брошь"));
}

#[actix_web::test]
async fn repeated_messages_coalesce_over_http() {
    let db = test_db().await;
    let app = test_app!(db);
    for text in ["Здравствуйте!", "Вы тут?"] {
        let message = MessageSent {
            dialogue_id: DialogueId(3),
            sender: UserRef::new(UserId(2), "oleg@market.ru"),
            recipient: UserId(1),
            text: text.to_string(),
        };
        let req = TestRequest::post().uri("/events/message-sent").set_json(message).to_request();
        let resp: JsonResponse = test::call_and_read_body_json(&app, req).await;
        assert!(resp.success);
    }

    let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, "1")).to_request();
    let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.len(), 1, "the dialogue badge is 0 or 1, never a message count");
    assert_eq!(feed[0].body, "Новое сообщение от oleg@market.ru: Вы тут?");
}

#[actix_web::test]
async fn opening_a_dialogue_clears_its_badge() {
    let db = test_db().await;
    let app = test_app!(db);
    let message = MessageSent {
        dialogue_id: DialogueId(4),
        sender: UserRef::new(UserId(2), "oleg@market.ru"),
        recipient: UserId(1),
        text: "Ау".to_string(),
    };
    let req = TestRequest::post().uri("/events/message-sent").set_json(message).to_request();
    test::call_service(&app, req).await;

    let params = DialogueOpenedParams { user: UserId(1), dialogue_id: DialogueId(4) };
    let req = TestRequest::post().uri("/events/dialogue-opened").set_json(params).to_request();
    let resp: JsonResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);

    let req =
        TestRequest::get().uri("/notifications/unread-count").insert_header((USER_ID_HEADER, "1")).to_request();
    let count: UnreadCountResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(count.count, 0);
}

#[actix_web::test]
async fn deleting_a_dialogue_sweeps_both_participants() {
    let db = test_db().await;
    let app = test_app!(db);
    for (sender, recipient) in [(2, 1), (1, 2)] {
        let message = MessageSent {
            dialogue_id: DialogueId(5),
            sender: UserRef::new(UserId(sender), format!("user{sender}@market.ru")),
            recipient: UserId(recipient),
            text: "Сообщение".to_string(),
        };
        let req = TestRequest::post().uri("/events/message-sent").set_json(message).to_request();
        test::call_service(&app, req).await;
    }

    let deleted = DialogueDeleted { dialogue_id: DialogueId(5), user1: UserId(1), user2: UserId(2) };
    let req = TestRequest::post().uri("/events/dialogue-deleted").set_json(deleted).to_request();
    let resp: JsonResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);

    for user in ["1", "2"] {
        let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, user)).to_request();
        let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
        assert!(feed.is_empty());
    }
}

#[actix_web::test]
async fn seller_cancellations_reach_the_buyer() {
    let db = test_db().await;
    let app = test_app!(db);
    let cancellation = SellerCancellation {
        order_id: 12,
        buyer: UserRef::new(UserId(100), "buyer@market.ru"),
        seller: UserRef::new(UserId(1), "vera@market.ru"),
    };
    let req = TestRequest::post().uri("/events/order-cancelled-by-seller").set_json(cancellation).to_request();
    let resp: JsonResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);

    let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, "100")).to_request();
    let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].title, "❌ Заказ отменен мастером");
    assert_eq!(feed[0].kind, NotificationKind::OrderCancelled);
}
