//! Request handler definitions
//!
//! Define each route and its handler here. Handlers that are more than a line or two MUST go into
//! a separate module. Keep this module neat and tidy 🙏
//!
//! Feed routes act on behalf of the user identified by the `mns_user_id` header (see
//! [`crate::auth`]). Trigger routes under `/events` are called service-to-service by the order and
//! chat subsystems after they have persisted their own state; they answer with a success flag and
//! never fail the caller's transaction, no matter what happened at the store.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use market_notify_engine::{
    notification_objects::{BuyerCancellation, DialogueDeleted, MessageSent, OrderPlaced, SellerCancellation},
    traits::NotificationStore,
    DispatchApi,
    FeedApi,
};

use crate::{
    auth::RequireUser,
    data_objects::{
        BulkDeleteResponse,
        DialogueOpenedParams,
        FeedParams,
        JsonResponse,
        SuccessResponse,
        UnreadCountResponse,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $bound:ty) => {
        paste::paste! { pub struct [<$name:camel Route>]<B>(core::marker::PhantomData<fn() -> B>); }
        paste::paste! {
            impl<B> [<$name:camel Route>]<B> {
                #[allow(clippy::new_without_default)]
                pub fn new() -> Self {
                    Self(core::marker::PhantomData)
                }
            }
        }
        paste::paste! {
            impl<B> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<B>
            where B: $bound + 'static
            {
                fn register(self, config: &mut actix_web::dev::AppService) {
                    let res = actix_web::Resource::new($path)
                        .name(stringify!($name))
                        .guard(actix_web::guard::$method())
                        .to($name::<B>);
                    actix_web::dev::HttpServiceFactory::register(res, config);
                }
            }
        }
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Feed  ----------------------------------------------------
route!(feed => Get "/notifications" impl NotificationStore);
/// The user's notification feed, newest first. Supports `offset`/`count` paging and the
/// `unread`/`kind` filters as query parameters.
pub async fn feed<B: NotificationStore>(
    user: RequireUser,
    params: web::Query<FeedParams>,
    api: web::Data<FeedApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = user.user_id();
    debug!("💻️ GET feed for user {user}");
    let notifications = api.feed(user, params.into_inner().into_filter()).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

route!(unread_count => Get "/notifications/unread-count" impl NotificationStore);
/// The badge endpoint. The storefront polls this on every page load, so a backend hiccup is
/// reported as a zero count rather than an error.
pub async fn unread_count<B: NotificationStore>(
    user: RequireUser,
    api: web::Data<FeedApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = user.user_id();
    trace!("💻️ GET unread count for user {user}");
    let count = match api.unread_count(user).await {
        Ok(count) => count,
        Err(e) => {
            error!("💻️ Could not fetch unread count for user {user}. {e}");
            0
        },
    };
    Ok(HttpResponse::Ok().json(UnreadCountResponse { count }))
}

route!(mark_read => Post "/notifications/{id}/read" impl NotificationStore);
pub async fn mark_read<B: NotificationStore>(
    user: RequireUser,
    path: web::Path<i64>,
    api: web::Data<FeedApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let user = user.user_id();
    debug!("💻️ POST mark notification #{id} read for user {user}");
    let marked = api.mark_as_read(user, id).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::from(marked)))
}

route!(mark_all_read => Post "/notifications/read-all" impl NotificationStore);
pub async fn mark_all_read<B: NotificationStore>(
    user: RequireUser,
    api: web::Data<FeedApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = user.user_id();
    debug!("💻️ POST mark all notifications read for user {user}");
    api.mark_all_read(user).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::from(true)))
}

route!(delete_notification => Post "/notifications/{id}/delete" impl NotificationStore);
/// Deletes one notification. Unread notifications are left alone and reported as
/// `{"success": false}`; the widget tells the user to read it first.
pub async fn delete_notification<B: NotificationStore>(
    user: RequireUser,
    path: web::Path<i64>,
    api: web::Data<FeedApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let id = path.into_inner();
    let user = user.user_id();
    debug!("💻️ POST delete notification #{id} for user {user}");
    let deleted = api.delete_single(user, id).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::from(deleted)))
}

route!(delete_all_read => Post "/notifications/delete-read" impl NotificationStore);
pub async fn delete_all_read<B: NotificationStore>(
    user: RequireUser,
    api: web::Data<FeedApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user = user.user_id();
    debug!("💻️ POST delete read notifications for user {user}");
    let deleted_count = api.delete_read(user).await?;
    Ok(HttpResponse::Ok().json(BulkDeleteResponse { success: true, deleted_count }))
}

//----------------------------------------------   Triggers  ----------------------------------------------------
route!(order_placed => Post "/events/order-placed" impl NotificationStore);
pub async fn order_placed<B: NotificationStore>(
    body: web::Json<OrderPlaced>,
    api: web::Data<DispatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let order = body.into_inner();
    debug!("💻️ POST order-placed event for order #{}", order.order_id);
    let notified = api.order_placed(&order).await;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("{notified} sellers notified"))))
}

route!(order_cancelled_by_buyer => Post "/events/order-cancelled-by-buyer" impl NotificationStore);
pub async fn order_cancelled_by_buyer<B: NotificationStore>(
    body: web::Json<BuyerCancellation>,
    api: web::Data<DispatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let cancellation = body.into_inner();
    debug!("💻️ POST buyer cancellation event for order #{}", cancellation.order_id);
    let notified = api.order_cancelled_by_buyer(&cancellation).await;
    Ok(HttpResponse::Ok().json(JsonResponse::success(format!("{notified} sellers notified"))))
}

route!(order_cancelled_by_seller => Post "/events/order-cancelled-by-seller" impl NotificationStore);
pub async fn order_cancelled_by_seller<B: NotificationStore>(
    body: web::Json<SellerCancellation>,
    api: web::Data<DispatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let cancellation = body.into_inner();
    debug!("💻️ POST seller cancellation event for order #{}", cancellation.order_id);
    let response = match api.order_cancelled_by_seller(&cancellation).await {
        true => JsonResponse::success("buyer notified"),
        false => JsonResponse::failure("buyer was not notified"),
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(message_sent => Post "/events/message-sent" impl NotificationStore);
pub async fn message_sent<B: NotificationStore>(
    body: web::Json<MessageSent>,
    api: web::Data<DispatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let message = body.into_inner();
    debug!("💻️ POST message-sent event in dialogue {}", message.dialogue_id);
    let response = match api.message_sent(&message).await {
        true => JsonResponse::success("recipient notified"),
        false => JsonResponse::failure("recipient was not notified"),
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(dialogue_opened => Post "/events/dialogue-opened" impl NotificationStore);
pub async fn dialogue_opened<B: NotificationStore>(
    body: web::Json<DialogueOpenedParams>,
    api: web::Data<DispatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let params = body.into_inner();
    debug!("💻️ POST dialogue-opened event for dialogue {}", params.dialogue_id);
    let response = match api.dialogue_opened(params.user, params.dialogue_id).await {
        true => JsonResponse::success("dialogue notifications marked read"),
        false => JsonResponse::failure("dialogue notifications were not marked read"),
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(dialogue_deleted => Post "/events/dialogue-deleted" impl NotificationStore);
pub async fn dialogue_deleted<B: NotificationStore>(
    body: web::Json<DialogueDeleted>,
    api: web::Data<DispatchApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let deleted = body.into_inner();
    debug!("💻️ POST dialogue-deleted event for dialogue {}", deleted.dialogue_id);
    let response = match api.dialogue_deleted(&deleted).await {
        true => JsonResponse::success("dialogue notifications removed"),
        false => JsonResponse::failure("dialogue notifications were not fully removed"),
    };
    Ok(HttpResponse::Ok().json(response))
}
