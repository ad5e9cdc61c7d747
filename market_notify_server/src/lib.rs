//! # Market Notify server
//! This crate hosts the HTTP surface of the marketplace notification service. It is responsible
//! for:
//! * Serving a user's notification feed and the unread-count badge the storefront polls on every
//!   page load.
//! * Accepting the read/delete lifecycle actions a user takes on their own notifications.
//! * Receiving business events from the order and chat subsystems and handing them to the
//!   dispatch engine, which fans out and coalesces notification rows.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Identity
//! Session handling lives upstream. Every user-scoped route requires the `mns_user_id` header,
//! injected by the gateway in front of this service; requests without it are rejected with 401.

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
