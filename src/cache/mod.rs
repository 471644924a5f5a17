//! Cache Module
//!
//! The shared volatile cache the message log lives in: the
//! [`SnapshotCache`] contract and an in-memory implementation with version
//! tokens, TTL expiration and LRU eviction.

mod backend;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use backend::{MemoryCache, SnapshotCache};
pub use entry::{CacheEntry, CachedValue, VersionToken};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 250;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
