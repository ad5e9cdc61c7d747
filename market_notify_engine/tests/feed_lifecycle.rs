use log::*;
use market_notify_engine::{
    db_types::{NewNotification, NotificationKind, SubjectKind, UserId},
    notification_objects::NotificationQueryFilter,
    traits::NotificationStore,
    FeedApi,
    SqliteDatabase,
};
use sqlx::{migrate::MigrateDatabase, Sqlite};

use crate::support::prepare_env::{prepare_test_env, random_db_path};

mod support;

const ALICE: UserId = UserId(1);
const BOB: UserId = UserId(2);

async fn setup() -> FeedApi<SqliteDatabase> {
    let url = random_db_path();
    prepare_test_env(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    FeedApi::new(db)
}

async fn tear_down(mut feed: FeedApi<SqliteDatabase>) {
    let url = feed.db().url().to_string();
    if let Err(e) = feed.db_mut().close().await {
        error!("🚀️ Failed to close database: {e}");
    }
    Sqlite::drop_database(&url).await.unwrap();
}

async fn seed(feed: &FeedApi<SqliteDatabase>, recipient: UserId, body: &str) -> i64 {
    let new = NewNotification::new(recipient, NotificationKind::System, body)
        .for_subject(SubjectKind::Order, 1)
        .with_action_url("/orders/sales/");
    feed.db().insert_notification(new).await.expect("Error seeding notification").id
}

#[tokio::test]
async fn unread_notifications_cannot_be_deleted() {
    let feed = setup().await;
    let id = seed(&feed, ALICE, "Что-то произошло").await;

    assert!(!feed.delete_single(ALICE, id).await.unwrap());
    assert_eq!(feed.feed(ALICE, NotificationQueryFilter::default()).await.unwrap().len(), 1);

    assert!(feed.mark_as_read(ALICE, id).await.unwrap());
    assert!(feed.delete_single(ALICE, id).await.unwrap());
    assert!(feed.feed(ALICE, NotificationQueryFilter::default()).await.unwrap().is_empty());
    tear_down(feed).await;
}

#[tokio::test]
async fn users_cannot_touch_each_others_notifications() {
    let feed = setup().await;
    let id = seed(&feed, ALICE, "Личное").await;

    assert!(!feed.mark_as_read(BOB, id).await.unwrap());
    assert_eq!(feed.unread_count(ALICE).await.unwrap(), 1);

    assert!(feed.mark_as_read(ALICE, id).await.unwrap());
    assert!(!feed.delete_single(BOB, id).await.unwrap());
    assert_eq!(feed.feed(ALICE, NotificationQueryFilter::default()).await.unwrap().len(), 1);

    assert!(feed.feed(BOB, NotificationQueryFilter::default()).await.unwrap().is_empty());
    assert_eq!(feed.unread_count(BOB).await.unwrap(), 0);
    assert_eq!(feed.delete_read(BOB).await.unwrap(), 0);
    tear_down(feed).await;
}

#[tokio::test]
async fn bulk_read_and_delete_are_scoped_and_counted() {
    let feed = setup().await;
    seed(&feed, ALICE, "Раз").await;
    seed(&feed, ALICE, "Два").await;
    seed(&feed, BOB, "Чужое").await;

    assert_eq!(feed.mark_all_read(ALICE).await.unwrap(), 2);
    assert_eq!(feed.mark_all_read(ALICE).await.unwrap(), 0, "mark_all_read must be idempotent");
    assert_eq!(feed.unread_count(ALICE).await.unwrap(), 0);
    assert_eq!(feed.unread_count(BOB).await.unwrap(), 1);

    assert_eq!(feed.delete_read(ALICE).await.unwrap(), 2);
    assert!(feed.feed(ALICE, NotificationQueryFilter::default()).await.unwrap().is_empty());
    assert_eq!(feed.feed(BOB, NotificationQueryFilter::default()).await.unwrap().len(), 1);
    tear_down(feed).await;
}

#[tokio::test]
async fn reads_are_monotonic() {
    let feed = setup().await;
    let id = seed(&feed, ALICE, "Новости").await;
    assert!(feed.mark_as_read(ALICE, id).await.unwrap());

    // Re-marking, bulk-marking and further traffic never flip a read row back to unread.
    assert!(feed.mark_as_read(ALICE, id).await.unwrap());
    feed.mark_all_read(ALICE).await.unwrap();
    seed(&feed, ALICE, "Ещё новости").await;

    let rows = feed.feed(ALICE, NotificationQueryFilter::default()).await.unwrap();
    let original = rows.iter().find(|n| n.id == id).expect("row must still exist");
    assert!(original.is_read);
    tear_down(feed).await;
}

#[tokio::test]
async fn feed_is_newest_first_and_pageable() {
    let feed = setup().await;
    let first = seed(&feed, ALICE, "Первое").await;
    let second = seed(&feed, ALICE, "Второе").await;
    let third = seed(&feed, ALICE, "Третье").await;

    let all = feed.feed(ALICE, NotificationQueryFilter::default()).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![third, second, first]);

    let page = feed.feed(ALICE, NotificationQueryFilter::default().paged(1, 2)).await.unwrap();
    let ids: Vec<i64> = page.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![second, first]);

    feed.mark_as_read(ALICE, second).await.unwrap();
    let unread = feed.feed(ALICE, NotificationQueryFilter::default().unread_only()).await.unwrap();
    let ids: Vec<i64> = unread.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![third, first]);
    tear_down(feed).await;
}
