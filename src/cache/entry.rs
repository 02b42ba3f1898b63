//! Cache Entry Module
//!
//! Defines a single stored value and its optional expiry deadline.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A stored value plus the instant (Unix milliseconds) it stops being visible.
///
/// Entries written with `SET` semantics start without a deadline and persist
/// until `EXPIRE` gives them one.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = persistent
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructors ==
    /// Creates an entry with no expiry.
    pub fn persistent(value: String) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    /// Creates an entry that expires `ttl_seconds` from now.
    pub fn expiring(value: String, ttl_seconds: u64) -> Self {
        let mut entry = Self::persistent(value);
        entry.expire_in(ttl_seconds);
        entry
    }

    // == Expire In ==
    /// Replaces the deadline with one `ttl_seconds` from now.
    pub fn expire_in(&mut self, ttl_seconds: u64) {
        let deadline = current_timestamp_ms().saturating_add(ttl_seconds.saturating_mul(1000));
        self.expires_at = Some(deadline);
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Same as [`CacheEntry::is_expired`] against an explicit clock reading.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        self.expires_at.is_some_and(|deadline| now_ms >= deadline)
    }

    // == Time To Live ==
    /// Remaining lifetime in whole seconds, rounded up.
    ///
    /// `None` for persistent entries; `Some(0)` once expired.
    pub fn ttl_remaining(&self) -> Option<u64> {
        let now = current_timestamp_ms();
        self.expires_at
            .map(|deadline| deadline.saturating_sub(now).div_ceil(1000))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
