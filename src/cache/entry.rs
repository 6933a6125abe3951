//! Cache entry with its storage timestamp.

use std::time::Duration;

use tokio::time::Instant;

/// A value stored in an [`ExpiringCache`](super::ExpiringCache).
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached value
    pub value: V,

    /// When the value was stored
    pub stored_at: Instant,

    /// Monotonic write number, used to match a scheduled removal to its write
    pub(crate) generation: u64,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(value: V, generation: u64) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
            generation,
        }
    }

    /// Time elapsed since the value was stored.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    /// An entry is visible only while `age < ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }
}
