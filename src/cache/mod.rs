//! Cache Module
//!
//! In-memory response caching: per-entry TTL with lazy expiry on read, a
//! periodic sweep (see [`crate::tasks`]), deterministic key construction,
//! and an optional least-recently-used capacity bound.

mod entry;
mod handle;
mod key;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use key::KeyBuilder;
pub use order::AccessOrder;
pub use stats::CacheStats;
pub use store::CacheStore;
