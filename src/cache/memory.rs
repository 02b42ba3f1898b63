//! In-process cache layer.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheLayer, CacheStore, KeyTtl};
use crate::error::AppResult;

// == Memory Cache ==
/// [`CacheStore`] shared behind an async lock.
///
/// Clones share the same underlying store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }

    /// Drops every expired entry. Driven periodically by the cleanup task.
    pub async fn purge_expired(&self) -> usize {
        self.store.write().await.purge_expired()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl CacheLayer for MemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        // Write lock: reads refresh LRU order and may drop expired keys.
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.store.write().await.set(key, value, None)
    }

    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool> {
        Ok(self.store.write().await.expire(key, seconds))
    }

    async fn ttl(&self, key: &str) -> AppResult<KeyTtl> {
        Ok(self.store.write().await.ttl(key))
    }

    async fn set_ex(&self, key: &str, value: String, seconds: u64) -> AppResult<()> {
        self.store.write().await.set(key, value, Some(seconds))
    }
}
