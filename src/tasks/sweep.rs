//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.
//! Lazy expiry on read already guarantees no stale value is ever served;
//! the sweep exists to bound the memory held by entries nobody reads.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::Cache;

/// Spawns a background task that sweeps `cache` every `interval`.
///
/// The interval should be well below the cache's default TTL (the shipped
/// defaults are two minutes against a one-hour TTL). The task runs until
/// aborted; the composition root aborts it on shutdown.
///
/// # Example
/// ```ignore
/// let cache: Cache<String> = Cache::new(&config);
/// let sweep = spawn_sweep_task(cache.clone(), config.sweep_interval);
/// // Later, during shutdown:
/// sweep.abort();
/// ```
pub fn spawn_sweep_task<V>(cache: Cache<V>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(?interval, "starting cache sweep task");

        loop {
            tokio::time::sleep(interval).await;

            // The write lock is held for one pass over the map only,
            // never across an await.
            let removed = cache.sweep_expired().await;

            if removed > 0 {
                info!(removed, "sweep removed expired entries");
            } else {
                debug!("sweep found no expired entries");
            }
        }
    })
}
