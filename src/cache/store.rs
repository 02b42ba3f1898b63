//! Cache Store Module
//!
//! Synchronous storage engine behind [`MemoryCache`](super::MemoryCache):
//! HashMap storage with Redis-style SET/EXPIRE/TTL semantics and LRU eviction.

use std::collections::HashMap;

use crate::cache::{CacheEntry, KeyTtl, LruTracker, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{AppError, AppResult};

// == Cache Store ==
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entries dropped to make room
    evictions: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            max_entries: max_entries.max(1),
            evictions: 0,
        }
    }

    // == Set ==
    /// Stores a value, replacing any previous value and deadline.
    ///
    /// `ttl` of `None` stores the value without expiry, like a bare `SET`.
    /// When a new key arrives at capacity, the least recently used key is evicted.
    pub fn set(&mut self, key: &str, value: String, ttl: Option<u64>) -> AppResult<()> {
        if key.is_empty() {
            return Err(AppError::InvalidRequest("Key cannot be empty".to_string()));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(AppError::InvalidRequest(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > MAX_VALUE_SIZE {
            return Err(AppError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            self.evict_one()?;
        }

        let entry = match ttl {
            Some(seconds) => CacheEntry::expiring(value, seconds),
            None => CacheEntry::persistent(value),
        };
        self.entries.insert(key.to_string(), entry);
        self.lru.touch(key);

        Ok(())
    }

    // == Get ==
    /// Returns the live value for `key`, dropping it first if it has expired.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if self.drop_if_expired(key) {
            return None;
        }
        let value = self.entries.get(key)?.value.clone();
        self.lru.touch(key);
        Some(value)
    }

    // == Expire ==
    /// Gives a live key a deadline `seconds` from now; `0` deletes it.
    ///
    /// Returns `false` when the key does not exist.
    pub fn expire(&mut self, key: &str, seconds: u64) -> bool {
        if self.drop_if_expired(key) {
            return false;
        }
        if seconds == 0 {
            return self.remove(key);
        }
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.expire_in(seconds);
                true
            }
            None => false,
        }
    }

    // == TTL ==
    pub fn ttl(&mut self, key: &str) -> KeyTtl {
        if self.drop_if_expired(key) {
            return KeyTtl::Missing;
        }
        match self.entries.get(key) {
            None => KeyTtl::Missing,
            Some(entry) => match entry.ttl_remaining() {
                Some(seconds) => KeyTtl::Expires(seconds),
                None => KeyTtl::Persistent,
            },
        }
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) -> bool {
        self.lru.remove(key);
        self.entries.remove(key).is_some()
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn purge_expired(&mut self) -> usize {
        let now = super::entry::current_timestamp_ms();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove(key);
        }
        expired.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    fn drop_if_expired(&mut self, key: &str) -> bool {
        let expired = self.entries.get(key).is_some_and(CacheEntry::is_expired);
        if expired {
            self.remove(key);
        }
        expired
    }

    fn evict_one(&mut self) -> AppResult<()> {
        // Expired entries go first so live keys are not evicted needlessly.
        if self.purge_expired() > 0 {
            return Ok(());
        }
        match self.lru.evict_oldest() {
            Some(victim) => {
                self.entries.remove(&victim);
                self.evictions += 1;
                tracing::debug!(key = %victim, "evicted least recently used cache entry");
                Ok(())
            }
            None => Err(AppError::Cache(
                "Cache is full and eviction failed".to_string(),
            )),
        }
    }
}
