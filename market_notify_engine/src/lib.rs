//! Market Notify Engine
//!
//! The notification engine for a handmade-goods marketplace. It owns the notification store and the
//! rules for writing to it: order events fan out to one notification per seller, chat messages
//! coalesce into a single unread notification per dialogue, and the read/delete lifecycle is
//! enforced at the store boundary.
//!
//! The library is divided into two main sections:
//! 1. Database management and control ([`mod@sqlite`]). SQLite is the supported backend. You should
//!    never need to access the database directly; use the public APIs instead. The exception is the
//!    data types used in the database, which are defined in the `db_types` module and are public.
//! 2. The engine public API. [`DispatchApi`] is the entry point for the order and chat subsystems
//!    (the event triggers), and [`FeedApi`] serves the notification feed and unread-count badge.
//!    Backends implement the traits in [`mod@traits`] to plug into these APIs.
//!
//! The engine also emits events when notification rows are written. A simple actor framework lets
//! you hook into these events and perform custom actions; see [`mod@events`].
pub mod db_types;
pub mod events;
pub mod helpers;
mod mne_api;
#[cfg(feature = "sqlite")]
mod sqlite;
pub mod traits;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use mne_api::{
    dispatch_api::DispatchApi,
    errors::NotificationApiError,
    feed_api::FeedApi,
    notification_objects,
};
