//! The engine public API.
//!
//! [`dispatch_api::DispatchApi`] is called by the order and chat subsystems when business events
//! happen; it applies the fan-out and coalescing rules and is *best-effort*: a failure to write a
//! notification is logged and reported as a falsy result, never an error, because the business
//! action it accompanies must succeed independently of the notification side channel.
//!
//! [`feed_api::FeedApi`] backs the notification feed and the unread-count badge. Its operations
//! were requested by the user directly, so errors propagate to the caller.
use log::warn;

use crate::traits::NotificationStoreError;

pub mod dispatch_api;
pub mod errors;
pub mod feed_api;
pub mod notification_objects;

/// The single place where the best-effort policy is applied: log the failure, swallow the error.
pub(crate) fn best_effort<T>(context: &str, result: Result<T, NotificationStoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("🔔️ Best-effort operation '{context}' failed: {e}");
            None
        },
    }
}
