//! Cache Backend Module
//!
//! The contract the log gateway needs from a shared volatile cache, and an
//! in-process implementation of it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;

use crate::cache::{CacheStats, CacheStore, CachedValue, VersionToken};
use crate::config::Config;
use crate::error::CacheError;

// == Snapshot Cache Trait ==
/// A shared key/value cache with versioned writes.
///
/// Implementations must apply each operation to a whole value atomically:
/// a reader never sees a partial write, and a compare-and-swap succeeds only
/// if no other write landed since `version` was handed out.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Fetches the value under `key` with its version token.
    ///
    /// Returns `Ok(None)` on a cache miss.
    async fn fetch(&self, key: &str) -> Result<Option<CachedValue>, CacheError>;

    /// Stores `data` under `key` without any version check.
    ///
    /// Used when no value exists yet. Two writers racing through this path
    /// both succeed and the last one wins.
    async fn create(&self, key: &str, data: Vec<u8>) -> Result<(), CacheError>;

    /// Stores `data` under `key` only if the current version is `version`.
    ///
    /// # Errors
    /// [`CacheError::VersionConflict`] if the entry changed or disappeared.
    async fn compare_and_swap(
        &self,
        key: &str,
        version: VersionToken,
        data: Vec<u8>,
    ) -> Result<(), CacheError>;
}

// == Memory Cache ==
/// In-process [`SnapshotCache`] backed by a locked [`CacheStore`].
///
/// Cloning shares the same store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries, default_ttl))),
        }
    }

    /// Creates a cache sized from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_entries, config.default_ttl)
    }

    /// Current statistics of the underlying store.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Removes expired entries, returning how many were dropped.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Drops the entry under `key`, as an eviction by the cache would.
    pub async fn evict(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }
}

#[async_trait]
impl SnapshotCache for MemoryCache {
    async fn fetch(&self, key: &str) -> Result<Option<CachedValue>, CacheError> {
        // Write lock: a fetch updates LRU order and statistics
        let value = self.store.write().await.get(key);
        trace!(key, hit = value.is_some(), "cache fetch");
        Ok(value)
    }

    async fn create(&self, key: &str, data: Vec<u8>) -> Result<(), CacheError> {
        let version = self.store.write().await.set(key.to_string(), data)?;
        trace!(key, %version, "cache create");
        Ok(())
    }

    async fn compare_and_swap(
        &self,
        key: &str,
        version: VersionToken,
        data: Vec<u8>,
    ) -> Result<(), CacheError> {
        let new_version = self
            .store
            .write()
            .await
            .compare_and_swap(key, version, data)?;
        trace!(key, expected = %version, %new_version, "cache swap");
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_miss() {
        let cache = MemoryCache::new(10, 0);
        assert_eq!(cache.fetch("messages").await, Ok(None));
    }

    #[tokio::test]
    async fn test_create_then_fetch() {
        let cache = MemoryCache::new(10, 0);
        cache.create("messages", b"[]".to_vec()).await.unwrap();

        let value = cache.fetch("messages").await.unwrap().unwrap();
        assert_eq!(value.data, b"[]");
    }

    #[tokio::test]
    async fn test_create_overwrites() {
        let cache = MemoryCache::new(10, 0);
        cache.create("messages", b"first".to_vec()).await.unwrap();
        cache.create("messages", b"second".to_vec()).await.unwrap();

        let value = cache.fetch("messages").await.unwrap().unwrap();
        assert_eq!(value.data, b"second");
    }

    #[tokio::test]
    async fn test_two_swaps_on_same_version() {
        let cache = MemoryCache::new(10, 0);
        cache.create("messages", b"base".to_vec()).await.unwrap();
        let seen = cache.fetch("messages").await.unwrap().unwrap().version;

        let first = cache.compare_and_swap("messages", seen, b"one".to_vec()).await;
        let second = cache.compare_and_swap("messages", seen, b"two".to_vec()).await;

        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(CacheError::VersionConflict));
        let value = cache.fetch("messages").await.unwrap().unwrap();
        assert_eq!(value.data, b"one");
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let cache = MemoryCache::new(10, 0);
        let other = cache.clone();
        cache.create("messages", b"x".to_vec()).await.unwrap();

        assert!(other.fetch("messages").await.unwrap().is_some());
        assert_eq!(other.stats().await.writes, 1);
    }

    #[tokio::test]
    async fn test_evict() {
        let cache = MemoryCache::new(10, 0);
        cache.create("messages", b"x".to_vec()).await.unwrap();

        assert!(cache.evict("messages").await);
        assert_eq!(cache.fetch("messages").await, Ok(None));
    }
}
