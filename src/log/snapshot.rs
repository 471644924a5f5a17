//! Log Snapshot Module
//!
//! The whole log as one versioned cache value. Messages are stored as a
//! JSON array, oldest first.

use crate::cache::{CachedValue, VersionToken};
use crate::error::{LogError, Result};
use crate::log::Message;

// == Log Snapshot ==
/// The message list as last read from the cache, with the version token
/// needed to replace it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSnapshot {
    /// Messages, oldest first
    pub messages: Vec<Message>,
    /// Token the cache handed out with this value
    pub version: VersionToken,
}

impl LogSnapshot {
    // == Decode ==
    /// Rebuilds a snapshot from a fetched cache value.
    ///
    /// A value that is not a message list means the cache holds something
    /// this server did not write, which is reported as a cache failure.
    pub fn from_cached(value: CachedValue) -> Result<Self> {
        let messages = decode_messages(&value.data)?;
        Ok(Self {
            messages,
            version: value.version,
        })
    }
}

// == Codec ==
/// Serializes a message list into the cached representation.
pub fn encode_messages(messages: &[Message]) -> Result<Vec<u8>> {
    serde_json::to_vec(messages)
        .map_err(|e| LogError::CacheUnavailable(format!("could not encode log: {}", e)))
}

/// Parses the cached representation back into a message list.
pub fn decode_messages(data: &[u8]) -> Result<Vec<Message>> {
    serde_json::from_slice(data)
        .map_err(|e| LogError::CacheUnavailable(format!("could not decode log: {}", e)))
}
