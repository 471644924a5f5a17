//! LRU Tracker Module
//!
//! Least Recently Used bookkeeping for cache eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Every touch stamps the key with the next value of a counter. The
/// smallest stamp is the least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Access stamp -> key, ordered oldest first
    by_stamp: BTreeMap<u64, String>,
    /// Key -> its current stamp
    stamps: HashMap<String, u64>,
    next_stamp: u64,
}

impl LruTracker {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if new.
    pub fn touch(&mut self, key: &str) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        if let Some(old) = self.stamps.insert(key.to_string(), stamp) {
            self.by_stamp.remove(&old);
        }
        self.by_stamp.insert(stamp, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(stamp) = self.stamps.remove(key) {
            self.by_stamp.remove(&stamp);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_stamp.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    #[cfg(test)]
    fn peek_oldest(&self) -> Option<&str> {
        self.by_stamp.values().next().map(String::as_str)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.stamps.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}
