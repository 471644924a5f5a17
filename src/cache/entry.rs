//! Cache Entry Module
//!
//! Defines a versioned cache entry with TTL support, and the value/token
//! pair handed out on fetch.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

// == Version Token ==
/// Opaque token identifying one write of a cache entry.
///
/// Every write to an entry gets a fresh token, so a compare-and-swap that
/// presents an older one can be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct VersionToken(u64);

impl VersionToken {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

// == Cached Value ==
/// Result of a successful fetch: the stored bytes and their version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedValue {
    pub data: Vec<u8>,
    pub version: VersionToken,
}

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub data: Vec<u8>,
    /// Version assigned by the last write
    pub version: VersionToken,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with optional TTL.
    ///
    /// # Arguments
    /// * `data` - The bytes to store
    /// * `version` - Token for this write
    /// * `ttl_seconds` - Optional TTL in seconds
    pub fn new(data: Vec<u8>, version: VersionToken, ttl_seconds: Option<u64>) -> Self {
        let now = current_timestamp_ms();
        let expires_at = ttl_seconds.map(|ttl| now + (ttl * 1000));

        Self {
            data,
            version,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Snapshot ==
    /// Copies out the value and its version.
    pub fn to_cached_value(&self) -> CachedValue {
        CachedValue {
            data: self.data.clone(),
            version: self.version,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as zero.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
