use actix_web::test::{self, TestRequest};
use market_notify_engine::{
    db_types::{DialogueId, Notification, UserId},
    notification_objects::{MessageSent, UserRef},
};

use crate::{
    auth::USER_ID_HEADER,
    data_objects::{BulkDeleteResponse, SuccessResponse, UnreadCountResponse},
    endpoint_tests::{test_app, test_db},
};

fn message_for(recipient: i64) -> MessageSent {
    MessageSent {
        dialogue_id: DialogueId(7),
        sender: UserRef::new(UserId(99), "sender@market.ru"),
        recipient: UserId(recipient),
        text: "Добрый день!".to_string(),
    }
}

#[actix_web::test]
async fn health_check_is_open() {
    let db = test_db().await;
    let app = test_app!(db);
    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn feed_routes_require_an_identity_header() {
    let db = test_db().await;
    let app = test_app!(db);
    for uri in ["/notifications", "/notifications/unread-count"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 401, "{uri} must reject anonymous requests");
    }
    let req = TestRequest::post().uri("/notifications/read-all").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_web::test]
async fn badge_reports_the_unread_count() {
    let db = test_db().await;
    let app = test_app!(db);
    let req = TestRequest::post().uri("/events/message-sent").set_json(message_for(1)).to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req =
        TestRequest::get().uri("/notifications/unread-count").insert_header((USER_ID_HEADER, "1")).to_request();
    let count: UnreadCountResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(count.count, 1);

    // The sender's own badge is untouched.
    let req =
        TestRequest::get().uri("/notifications/unread-count").insert_header((USER_ID_HEADER, "99")).to_request();
    let count: UnreadCountResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(count.count, 0);
}

#[actix_web::test]
async fn notifications_must_be_read_before_deletion() {
    let db = test_db().await;
    let app = test_app!(db);
    let req = TestRequest::post().uri("/events/message-sent").set_json(message_for(1)).to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, "1")).to_request();
    let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.len(), 1);
    let id = feed[0].id;

    let req = TestRequest::post()
        .uri(&format!("/notifications/{id}/delete"))
        .insert_header((USER_ID_HEADER, "1"))
        .to_request();
    let resp: SuccessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!resp.success, "an unread notification must not be deletable");

    let req = TestRequest::post()
        .uri(&format!("/notifications/{id}/read"))
        .insert_header((USER_ID_HEADER, "1"))
        .to_request();
    let resp: SuccessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);

    let req = TestRequest::post()
        .uri(&format!("/notifications/{id}/delete"))
        .insert_header((USER_ID_HEADER, "1"))
        .to_request();
    let resp: SuccessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);

    let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, "1")).to_request();
    let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
    assert!(feed.is_empty());
}

#[actix_web::test]
async fn users_cannot_act_on_foreign_notifications() {
    let db = test_db().await;
    let app = test_app!(db);
    let req = TestRequest::post().uri("/events/message-sent").set_json(message_for(1)).to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, "1")).to_request();
    let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
    let id = feed[0].id;

    // A different user cannot read or delete it, and does not see it in their feed.
    let req = TestRequest::post()
        .uri(&format!("/notifications/{id}/read"))
        .insert_header((USER_ID_HEADER, "2"))
        .to_request();
    let resp: SuccessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!resp.success);

    let req = TestRequest::post()
        .uri(&format!("/notifications/{id}/delete"))
        .insert_header((USER_ID_HEADER, "2"))
        .to_request();
    let resp: SuccessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!resp.success);

    let req = TestRequest::get().uri("/notifications").insert_header((USER_ID_HEADER, "2")).to_request();
    let feed: Vec<Notification> = test::call_and_read_body_json(&app, req).await;
    assert!(feed.is_empty());
}

#[actix_web::test]
async fn bulk_cleanup_reports_the_deleted_count() {
    let db = test_db().await;
    let app = test_app!(db);
    for dialogue in [1, 2] {
        let mut message = message_for(1);
        message.dialogue_id = DialogueId(dialogue);
        let req = TestRequest::post().uri("/events/message-sent").set_json(message).to_request();
        test::call_service(&app, req).await;
    }

    let req = TestRequest::post().uri("/notifications/read-all").insert_header((USER_ID_HEADER, "1")).to_request();
    let resp: SuccessResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);

    let req =
        TestRequest::post().uri("/notifications/delete-read").insert_header((USER_ID_HEADER, "1")).to_request();
    let resp: BulkDeleteResponse = test::call_and_read_body_json(&app, req).await;
    assert!(resp.success);
    assert_eq!(resp.deleted_count, 2);
}
