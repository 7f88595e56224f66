//! Cache Entry Module
//!
//! Defines a single cached value together with its validity window.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};

// == Cache Entry ==
/// A stored value and the window during which it may be served.
///
/// The value is held behind an `Arc` and handed out by handle: retrieval
/// never deep-copies, and callers must not assume exclusive ownership of
/// what they get back.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value, shared with every reader that retrieved it
    pub value: Arc<V>,
    /// Insertion timestamp
    pub created_at: DateTime<Utc>,
    /// End of the validity window
    pub expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` after now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let created_at = Utc::now();
        let ttl = ChronoDuration::from_std(ttl).unwrap_or(ChronoDuration::MAX);
        let expires_at = created_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value: Arc::new(value),
            created_at,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the validity window has closed.
    ///
    /// Boundary condition: an entry is expired once the current time is
    /// greater than or equal to `expires_at`, so a reader arriving exactly
    /// at the boundary is treated as a miss.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining validity window, zero if already expired.
    ///
    /// Used for stats and debugging only; serving decisions go through
    /// [`CacheEntry::is_expired`].
    pub fn ttl_remaining(&self) -> Duration {
        (self.expires_at - Utc::now()).to_std().unwrap_or(Duration::ZERO)
    }
}

impl<V> Clone for CacheEntry<V> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}
