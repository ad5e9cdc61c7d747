use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::info;
use market_notify_engine::{
    events::{EventHandlers, EventHooks, EventProducers},
    DispatchApi,
    FeedApi,
    SqliteDatabase,
};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        health,
        DeleteAllReadRoute,
        DeleteNotificationRoute,
        DialogueDeletedRoute,
        DialogueOpenedRoute,
        FeedRoute,
        MarkAllReadRoute,
        MarkReadRoute,
        MessageSentRoute,
        OrderCancelledByBuyerRoute,
        OrderCancelledBySellerRoute,
        OrderPlacedRoute,
        UnreadCountRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let handlers = EventHandlers::new(config.event_buffer_size, build_hooks(&config));
    let producers = handlers.producers();
    handlers.start_handlers().await;
    let srv = create_server_instance(config, db, producers)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// The default hook set for a standalone server: structured log lines for every notification
/// write, if the configuration asks for them.
fn build_hooks(config: &ServerConfig) -> EventHooks {
    let mut hooks = EventHooks::default();
    if config.log_notification_events {
        hooks.on_notification_created(|ev| {
            Box::pin(async move {
                let n = ev.notification;
                info!("🔔️ user {} got a {} notification (#{})", n.recipient, n.kind, n.id);
            })
        });
        hooks.on_notification_coalesced(|ev| {
            Box::pin(async move {
                let n = ev.notification;
                info!("🔔️ notification #{} for user {} was rewritten in place", n.id, n.recipient);
            })
        });
    }
    hooks
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let dispatch_api = DispatchApi::new(db.clone(), producers.clone());
        let feed_api = FeedApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("mns::access_log"))
            .app_data(web::Data::new(dispatch_api))
            .app_data(web::Data::new(feed_api))
            .service(health)
            .service(FeedRoute::<SqliteDatabase>::new())
            .service(UnreadCountRoute::<SqliteDatabase>::new())
            .service(MarkReadRoute::<SqliteDatabase>::new())
            .service(MarkAllReadRoute::<SqliteDatabase>::new())
            .service(DeleteNotificationRoute::<SqliteDatabase>::new())
            .service(DeleteAllReadRoute::<SqliteDatabase>::new())
            .service(OrderPlacedRoute::<SqliteDatabase>::new())
            .service(OrderCancelledByBuyerRoute::<SqliteDatabase>::new())
            .service(OrderCancelledBySellerRoute::<SqliteDatabase>::new())
            .service(MessageSentRoute::<SqliteDatabase>::new())
            .service(DialogueOpenedRoute::<SqliteDatabase>::new())
            .service(DialogueDeletedRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
