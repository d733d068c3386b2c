//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Timestamps come from the monotonic clock, so wall-clock adjustments never
/// shorten or extend an entry's lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Moment the entry was inserted
    pub created_at: Instant,
    /// Moment the entry stops being valid, None = the TTL overflows the clock
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time-to-live applied from the moment of insertion
    pub fn new(value: String, ttl: Duration) -> Self {
        let now = Instant::now();

        Self {
            value,
            created_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is valid only while `now < expires_at`; once the TTL has fully
    /// elapsed the entry is expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime, `Duration::ZERO` once expired.
    ///
    /// # Returns
    /// - `Some(remaining)` if the entry has a reachable expiry
    /// - `None` if the TTL was too large to represent
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
