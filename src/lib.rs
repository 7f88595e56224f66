//! shopcache - in-process response cache for storefront read endpoints
//!
//! A process-local, TTL-bounded key/value cache plus the read-through and
//! invalidation services that surround it in a storefront backend. Expired
//! entries are dropped lazily on read and proactively by a background
//! sweep task; writes invalidate or overwrite the exact keys they affect.

pub mod cache;
pub mod config;
pub mod error;
pub mod storefront;
pub mod tasks;

pub use cache::{Cache, CacheStats, CacheStore, KeyBuilder};
pub use config::CacheConfig;
pub use error::{Result, SourceError};
pub use storefront::Storefront;
pub use tasks::spawn_sweep_task;
