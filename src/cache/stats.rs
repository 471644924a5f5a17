//! Cache Statistics Module
//!
//! Tracks hits, misses, evictions, writes and refused compare-and-swaps.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Fetches that found a live entry
    pub hits: u64,
    /// Fetches that found nothing (absent or expired)
    pub misses: u64,
    /// Entries evicted due to LRU policy
    pub evictions: u64,
    /// Successful writes, both plain sets and swaps
    pub writes: u64,
    /// Compare-and-swap attempts refused for a stale version
    pub cas_conflicts: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if nothing was fetched yet.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Number of fetches served, hit or miss.
    pub fn fetches(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_cas_conflict(&mut self) {
        self.cas_conflicts += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
