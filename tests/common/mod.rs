//! Shared test doubles that count how the lookup touches its collaborators.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use post_cache::cache::{CacheLayer, KeyTtl, MemoryCache};
use post_cache::posts::{InMemoryPostRepository, NewPost, Post, PostRepository};
use post_cache::{AppError, AppResult, PostLookup};

/// Primary store wrapper counting `find_by_id` calls.
#[derive(Clone, Default)]
pub struct CountingRepository {
    pub inner: InMemoryPostRepository,
    finds: Arc<AtomicUsize>,
}

impl CountingRepository {
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            inner: InMemoryPostRepository::with_posts(posts),
            finds: Arc::default(),
        }
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostRepository for CountingRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, new_post: NewPost) -> AppResult<Post> {
        self.inner.insert(new_post).await
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Post>> {
        self.inner.list_recent(limit).await
    }
}

/// Cache layer wrapper counting writes (`set`, `set_ex`, `expire`).
#[derive(Clone)]
pub struct RecordingCache {
    pub inner: MemoryCache,
    writes: Arc<AtomicUsize>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            inner: MemoryCache::new(1000),
            writes: Arc::default(),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheLayer for RecordingCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value).await
    }

    async fn expire(&self, key: &str, seconds: u64) -> AppResult<bool> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.expire(key, seconds).await
    }

    async fn ttl(&self, key: &str) -> AppResult<KeyTtl> {
        self.inner.ttl(key).await
    }

    async fn set_ex(&self, key: &str, value: String, seconds: u64) -> AppResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_ex(key, value, seconds).await
    }
}

/// Cache layer whose every command fails as if the backend were unreachable.
pub struct UnreachableCache;

#[async_trait]
impl CacheLayer for UnreachableCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Err(AppError::Cache("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: String) -> AppResult<()> {
        Err(AppError::Cache("connection refused".into()))
    }

    async fn expire(&self, _key: &str, _seconds: u64) -> AppResult<bool> {
        Err(AppError::Cache("connection refused".into()))
    }

    async fn ttl(&self, _key: &str) -> AppResult<KeyTtl> {
        Err(AppError::Cache("connection refused".into()))
    }
}

/// Cache layer that answers reads but rejects every write.
///
/// `get` always misses, so a lookup reaches the primary store and then fails
/// while populating.
pub struct ReadOnlyCache;

#[async_trait]
impl CacheLayer for ReadOnlyCache {
    async fn get(&self, _key: &str) -> AppResult<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: String) -> AppResult<()> {
        Err(AppError::Cache("READONLY You can't write against a read only replica".into()))
    }

    async fn expire(&self, _key: &str, _seconds: u64) -> AppResult<bool> {
        Err(AppError::Cache("READONLY You can't write against a read only replica".into()))
    }

    async fn ttl(&self, _key: &str) -> AppResult<KeyTtl> {
        Ok(KeyTtl::Missing)
    }

    async fn set_ex(&self, _key: &str, _value: String, _seconds: u64) -> AppResult<()> {
        Err(AppError::Cache("READONLY You can't write against a read only replica".into()))
    }
}

/// Primary store whose reads fail as if the database were down.
///
/// Writes go to an in-memory store so setup and deletes still work.
#[derive(Clone, Default)]
pub struct UnreachableRepository {
    pub inner: InMemoryPostRepository,
}

#[async_trait]
impl PostRepository for UnreachableRepository {
    async fn find_by_id(&self, _id: &str) -> AppResult<Option<Post>> {
        Err(AppError::Store("database is closed".into()))
    }

    async fn insert(&self, new_post: NewPost) -> AppResult<Post> {
        self.inner.insert(new_post).await
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn list_recent(&self, _limit: usize) -> AppResult<Vec<Post>> {
        Err(AppError::Store("database is closed".into()))
    }
}

/// The post used by the `p1` scenario, with a fixed creation time.
pub fn hello_post() -> Post {
    let mut post = Post::with_id("p1", NewPost::new("Hello", "World"));
    post.created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    post
}

/// Lookup wired to counting doubles, plus handles on them.
pub fn counting_lookup(
    posts: impl IntoIterator<Item = Post>,
) -> (PostLookup, CountingRepository, RecordingCache) {
    let repo = CountingRepository::with_posts(posts);
    let cache = RecordingCache::new();
    let lookup = PostLookup::new(Arc::new(repo.clone()), Arc::new(cache.clone()));
    (lookup, repo, cache)
}
