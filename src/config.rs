//! Configuration Module
//!
//! Process-wide cache configuration, loaded once at startup from
//! environment variables. There is no runtime reconfiguration.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults: an hour of freshness, swept every two minutes, no entry
/// count bound.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied to entries stored without an explicit one
    pub default_ttl: Duration,
    /// Interval between background sweep passes
    pub sweep_interval: Duration,
    /// Maximum entry count, `None` for TTL-bounded only
    pub capacity: Option<usize>,
}

impl CacheConfig {
    /// Creates a new CacheConfig from environment variables.
    ///
    /// # Environment Variables
    /// - `SHOPCACHE_DEFAULT_TTL_SECS` - Entry TTL in seconds (default: 3600)
    /// - `SHOPCACHE_SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 120)
    /// - `SHOPCACHE_CAPACITY` - Maximum entries (default: unbounded)
    pub fn from_env() -> Self {
        Self {
            default_ttl: Duration::from_secs(
                env::var("SHOPCACHE_DEFAULT_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3600),
            ),
            sweep_interval: Duration::from_secs(
                env::var("SHOPCACHE_SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(120),
            ),
            capacity: env::var("SHOPCACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(3600),
            sweep_interval: Duration::from_secs(120),
            capacity: None,
        }
    }
}
