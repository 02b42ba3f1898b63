//! Cache Module
//!
//! The cache layer seen by the post lookup: an expiring key-value store.
//! Two backends are provided, an in-process TTL store and Redis over the
//! Upstash REST API.

mod entry;
mod lru;
mod memory;
mod store;
mod upstash;

#[cfg(test)]
mod property_tests;

use async_trait::async_trait;

use crate::error::AppResult;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use store::CacheStore;
pub use upstash::UpstashCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Key TTL ==
/// Result of a TTL query, mirroring Redis' `-2` / `-1` / seconds replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist
    Missing,
    /// The key exists without a deadline
    Persistent,
    /// The key expires in this many seconds
    Expires(u64),
}

// == Cache Layer ==
/// Expiring key-value store consulted before the primary store.
///
/// Every method may fail with [`AppError::Cache`](crate::error::AppError::Cache)
/// when the backend is unreachable; callers propagate such failures. Writes of
/// empty or oversized keys and values fail with
/// [`AppError::InvalidRequest`](crate::error::AppError::InvalidRequest).
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` under `key` with no expiry, replacing any previous deadline.
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Sets a deadline `seconds` from now. Returns `false` if the key is absent.
    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool>;

    /// Reports the remaining lifetime of `key`.
    async fn ttl(&self, key: &str) -> AppResult<KeyTtl>;

    /// Stores `value` and gives it a deadline.
    ///
    /// Backends that can do this in a single command override it.
    async fn set_ex(&self, key: &str, value: String, seconds: u64) -> AppResult<()> {
        self.set(key, value).await?;
        self.expire(key, seconds).await?;
        Ok(())
    }
}
