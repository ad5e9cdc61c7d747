//! # Database management and control.
//!
//! This module defines the interface contract that notification store *backends* must satisfy.
//!
//! A notification is a single row owned by its recipient. The [`NotificationStore`] trait exposes
//! the writes the dispatch rules need (plain inserts for order events, a coalescing upsert for
//! chat messages) and the read/delete lifecycle the feed needs. Every operation is scoped to the
//! acting user; a backend must never let one user's call touch another user's rows.
mod notification_store;

pub use notification_store::{NotificationStore, NotificationStoreError};
