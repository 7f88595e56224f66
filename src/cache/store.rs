//! Cache Store Module
//!
//! Core key/value engine: HashMap storage with TTL expiry checked lazily
//! on read, an explicit sweep for expired entries, and an optional
//! least-recently-used capacity bound.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::cache::{AccessOrder, CacheEntry, CacheStats};
use crate::config::CacheConfig;

// == Cache Store ==
/// In-memory store for one logical cache domain.
///
/// Misses are `None`, deletes of absent keys are `false`, and a full store
/// that cannot evict skips the insert: no operation here ever fails the
/// surrounding request.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency tracking for capacity eviction
    access: AccessOrder,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of entries, `None` for TTL-bounded only
    capacity: Option<usize>,
    /// TTL applied when `set` is not given an explicit one
    default_ttl: Duration,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a store with the given capacity bound and default TTL.
    pub fn new(capacity: Option<usize>, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            access: AccessOrder::new(),
            stats: CacheStats::new(),
            capacity,
            default_ttl,
        }
    }

    /// Creates a store from process configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, config.default_ttl)
    }

    // == Get ==
    /// Returns the live value for `key`, or `None` on absence or expiry.
    ///
    /// An expired entry found here is removed immediately, so a reader is
    /// never served stale data even if the sweep has not run yet. Both the
    /// absent and the expired case count as a miss.
    pub fn get(&mut self, key: &str) -> Option<Arc<V>> {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            self.entries.remove(key);
            self.access.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        let value = Arc::clone(&entry.value);
        self.stats.record_hit();
        self.access.touch(key);
        Some(value)
    }

    // == Set ==
    /// Inserts or fully replaces the entry for `key`.
    ///
    /// Replacement resets the validity window; prior value and TTL are
    /// discarded, never merged. With a capacity bound, inserting into a
    /// full store evicts the least recently used entry first; if no
    /// eviction candidate exists the insert is skipped with a warning.
    ///
    /// Returns the shared handle to the stored value.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Arc<V> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value, ttl);
        let shared = Arc::clone(&entry.value);

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.at_capacity() {
            match self.access.pop_oldest() {
                Some(victim) => {
                    self.entries.remove(&victim);
                    self.stats.record_eviction();
                }
                None => {
                    warn!(%key, "cache full with no eviction candidate, skipping insert");
                    return shared;
                }
            }
        }

        self.entries.insert(key.clone(), entry);
        self.access.touch(&key);
        self.stats.set_total_entries(self.entries.len());
        shared
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether anything was removed;
    /// deleting an absent key is a no-op, not an error.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.access.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes all entries. Operational/debug use.
    pub fn clear(&mut self) {
        self.entries.clear();
        while self.access.pop_oldest().is_some() {}
        self.stats.set_total_entries(0);
    }

    // == Sweep ==
    /// Removes every expired entry, returning how many were dropped.
    /// Called periodically by the background sweep task.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.entries.remove(&key);
            self.access.remove(&key);
        }

        self.stats.record_expirations(count as u64);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns a snapshot of the instance counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Current number of entries, expired-but-unswept ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn at_capacity(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.entries.len() >= capacity)
    }
}
