use std::env;

use log::*;
use mns_common::parse_boolean_flag;

const DEFAULT_MNS_HOST: &str = "127.0.0.1";
const DEFAULT_MNS_PORT: u16 = 8380;
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Buffer size of the notification event hook channels.
    pub event_buffer_size: usize,
    /// If true, the server registers hooks that log every notification write. Useful in
    /// production to trace fan-out without turning on sqlx query logging.
    pub log_notification_events: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_MNS_HOST.to_string(),
            port: DEFAULT_MNS_PORT,
            database_url: String::default(),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
            log_notification_events: true,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("MNS_HOST").ok().unwrap_or_else(|| DEFAULT_MNS_HOST.into());
        let port = env::var("MNS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for MNS_PORT. {e} Using the default, {DEFAULT_MNS_PORT}, instead."
                    );
                    DEFAULT_MNS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_MNS_PORT);
        let database_url = env::var("MNS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ MNS_DATABASE_URL is not set. Please set it to the URL for the notifications database.");
            String::default()
        });
        let event_buffer_size = env::var("MNS_EVENT_BUFFER_SIZE")
            .ok()
            .and_then(|s| {
                s.parse::<usize>()
                    .map_err(|e| {
                        error!("🪛️ {s} is not a valid value for MNS_EVENT_BUFFER_SIZE. {e} Using the default.");
                        e
                    })
                    .ok()
            })
            .unwrap_or(DEFAULT_EVENT_BUFFER_SIZE);
        let log_notification_events = parse_boolean_flag(env::var("MNS_LOG_NOTIFICATION_EVENTS").ok(), true);
        Self { host, port, database_url, event_buffer_size, log_notification_events }
    }
}
