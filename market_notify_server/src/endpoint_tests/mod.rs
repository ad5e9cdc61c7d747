//! In-process endpoint tests.
//!
//! Each test spins up the full actix `App` against a throwaway SQLite database, drives it through
//! `actix_web::test`, and checks the JSON bodies the storefront widget and the subsystem triggers
//! rely on.
mod feed;
mod triggers;

use market_notify_engine::{
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    SqliteDatabase,
};

pub(crate) async fn test_db() -> SqliteDatabase {
    let url = random_db_path();
    prepare_test_env(&url).await;
    SqliteDatabase::new_with_url(&url, 2).await.expect("Error creating test database")
}

/// Builds the same route table as [`crate::server::create_server_instance`], minus the access-log
/// middleware, wrapped in `test::init_service`. A macro because the `App` type cannot be named.
macro_rules! test_app {
    ($db:expr) => {{
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(market_notify_engine::FeedApi::new($db.clone())))
                .app_data(actix_web::web::Data::new(market_notify_engine::DispatchApi::new(
                    $db.clone(),
                    market_notify_engine::events::EventProducers::default(),
                )))
                .service($crate::routes::health)
                .service($crate::routes::FeedRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::UnreadCountRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::MarkReadRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::MarkAllReadRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::DeleteNotificationRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::DeleteAllReadRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::OrderPlacedRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::OrderCancelledByBuyerRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::OrderCancelledBySellerRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::MessageSentRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::DialogueOpenedRoute::<market_notify_engine::SqliteDatabase>::new())
                .service($crate::routes::DialogueDeletedRoute::<market_notify_engine::SqliteDatabase>::new()),
        )
        .await
    }};
}
pub(crate) use test_app;
