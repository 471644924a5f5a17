//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::log::{DEFAULT_CAPACITY, DEFAULT_MESSAGES_KEY, MAX_CONTENT_SIZE};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of most recent messages kept in the log
    pub log_capacity: NonZeroUsize,
    /// Largest accepted message payload in bytes
    pub max_content_size: usize,
    /// Cache key the log is stored under
    pub messages_key: String,
    /// Maximum number of entries the in-process cache can hold
    pub max_entries: usize,
    /// TTL in seconds for cache writes, 0 = never expires
    pub default_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Serve the submit form at /dev
    pub dev_mode: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `LOG_CAPACITY` - Messages kept, at least 1 (default: 50)
    /// - `MAX_CONTENT_SIZE` - Payload limit in bytes (default: 256)
    /// - `MESSAGES_KEY` - Cache key of the log (default: "messages")
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Cache TTL in seconds, 0 disables (default: 0)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DEV_MODE` - `1`, `true` or `yes` enables /dev (default: off)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_capacity: parse_var("LOG_CAPACITY").unwrap_or(defaults.log_capacity),
            max_content_size: parse_var("MAX_CONTENT_SIZE").unwrap_or(defaults.max_content_size),
            messages_key: env::var("MESSAGES_KEY")
                .ok()
                .filter(|k| !k.is_empty())
                .unwrap_or(defaults.messages_key),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            cleanup_interval: parse_var::<u64>("CLEANUP_INTERVAL")
                .filter(|&secs| secs > 0)
                .unwrap_or(defaults.cleanup_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            dev_mode: env::var("DEV_MODE")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.dev_mode),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_capacity: NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            max_content_size: MAX_CONTENT_SIZE,
            messages_key: DEFAULT_MESSAGES_KEY.to_string(),
            max_entries: 1000,
            default_ttl: 0,
            cleanup_interval: 1,
            server_port: 3000,
            dev_mode: false,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
