//! Cache Handle Module
//!
//! The shared, cloneable cache component handed to read and write services
//! by the application's composition root. One handle per logical cache
//! domain (categories, product pages, profiles, ...).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;

// == Cache ==
/// Thread-safe handle over a [`CacheStore`].
///
/// Clones share the same underlying store. Concurrent `set`s on one key
/// resolve to last-write-wins; no operation spans more than one key.
pub struct Cache<V> {
    inner: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Cache<V> {
    // == Constructors ==
    /// Creates a cache from process configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self::from_store(CacheStore::from_config(config))
    }

    /// Wraps an already-configured store.
    pub fn from_store(store: CacheStore<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // == Get ==
    /// Returns the live value for `key`, if any. Never an error: absence
    /// and expiry are both a plain `None`.
    pub async fn get(&self, key: &str) -> Option<Arc<V>> {
        // Write lock: a get may drop an expired entry and touches recency.
        self.inner.write().await.get(key)
    }

    // == Set ==
    /// Inserts or replaces `key` with the instance default TTL.
    pub async fn set(&self, key: impl Into<String>, value: V) -> Arc<V> {
        self.inner.write().await.set(key.into(), value, None)
    }

    /// Inserts or replaces `key` with an explicit TTL.
    pub async fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) -> Arc<V> {
        self.inner.write().await.set(key.into(), value, Some(ttl))
    }

    // == Delete ==
    /// Removes `key` if present; the write-side invalidation entry point.
    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    // == Read-Through ==
    /// Returns the cached value for `key`, computing and storing it on a
    /// miss.
    ///
    /// The check-compute-store sequence is not atomic with respect to a
    /// concurrent invalidation of the same key: a delete landing between
    /// the miss and the store is overwritten by the computed value, which
    /// then ages out by TTL. Source errors propagate; they are never
    /// cached.
    pub async fn get_or_insert_with<F, Fut, E>(&self, key: &str, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(value);
        }

        debug!(%key, "cache miss, computing from source");
        let value = compute().await?;
        Ok(self.set(key.to_string(), value).await)
    }

    // == Maintenance ==
    /// Drops every expired entry; used by the background sweep task.
    pub async fn sweep_expired(&self) -> usize {
        self.inner.write().await.sweep_expired()
    }

    /// Snapshot of the instance counters.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    /// Current entry count, expired-but-unswept entries included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
