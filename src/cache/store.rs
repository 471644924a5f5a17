//! Cache Store Module
//!
//! Versioned key/value engine: HashMap storage with LRU tracking, TTL
//! expiration and compare-and-swap on version tokens.

use std::collections::HashMap;

use crate::cache::{
    CacheEntry, CacheStats, CachedValue, LruTracker, VersionToken, MAX_KEY_LENGTH,
    MAX_VALUE_SIZE,
};
use crate::error::CacheError;

// == Cache Store ==
/// Main cache storage with LRU eviction, TTL and versioned writes.
///
/// Not synchronized; [`MemoryCache`](crate::cache::MemoryCache) wraps it in a
/// lock so every operation applies to a whole value at once.
#[derive(Debug)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in seconds applied to every write, 0 = never expires
    default_ttl: u64,
    /// Last version handed out; shared by all keys
    last_version: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `default_ttl` - TTL in seconds for every write, 0 disables expiry
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
            last_version: 0,
        }
    }

    // == Get ==
    /// Returns the live value under `key` and its version, or None on a miss.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<CachedValue> {
        if self.remove_if_expired(key) {
            self.stats.record_miss();
            return None;
        }

        match self.entries.get(key) {
            Some(entry) => {
                let value = entry.to_cached_value();
                self.stats.record_hit();
                self.lru.touch(key);
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `data` under `key` unconditionally and returns the new version.
    ///
    /// Overwrites any existing value. A new key evicts the least recently
    /// used entry when the cache is at capacity.
    pub fn set(&mut self, key: String, data: Vec<u8>) -> Result<VersionToken, CacheError> {
        Self::validate(&key, &data)?;

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted_key) => {
                    self.entries.remove(&evicted_key);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(CacheError::Unavailable(
                        "cache is full and eviction failed".to_string(),
                    ));
                }
            }
        }

        Ok(self.write(key, data))
    }

    // == Compare And Swap ==
    /// Replaces the value under `key` only if its version still equals
    /// `expected`.
    ///
    /// An entry that expired, was evicted, or was rewritten since `expected`
    /// was handed out yields [`CacheError::VersionConflict`] and leaves the
    /// cache untouched.
    pub fn compare_and_swap(
        &mut self,
        key: &str,
        expected: VersionToken,
        data: Vec<u8>,
    ) -> Result<VersionToken, CacheError> {
        Self::validate(key, &data)?;
        self.remove_if_expired(key);

        let current = self.entries.get(key).map(|entry| entry.version);
        if current != Some(expected) {
            self.stats.record_cas_conflict();
            return Err(CacheError::VersionConflict);
        }

        Ok(self.write(key.to_string(), data))
    }

    // == Delete ==
    /// Removes an entry. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.lru.remove(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    fn validate(key: &str, data: &[u8]) -> Result<(), CacheError> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "key must be 1 to {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if data.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidRequest(format!(
                "value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }
        Ok(())
    }

    fn remove_if_expired(&mut self, key: &str) -> bool {
        let expired = self.entries.get(key).is_some_and(CacheEntry::is_expired);
        if expired {
            self.delete(key);
        }
        expired
    }

    fn write(&mut self, key: String, data: Vec<u8>) -> VersionToken {
        self.last_version += 1;
        let version = VersionToken::new(self.last_version);
        let ttl = (self.default_ttl > 0).then_some(self.default_ttl);

        self.entries.insert(key.clone(), CacheEntry::new(data, version, ttl));
        self.lru.touch(&key);
        self.stats.record_write();
        self.stats.set_total_entries(self.entries.len());
        version
    }
}
