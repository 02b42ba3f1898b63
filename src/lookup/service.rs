//! Read-through lookup of posts.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::CacheLayer;
use crate::config::{Config, DEFAULT_CACHE_PREFIX};
use crate::error::{AppError, AppResult};
use crate::lookup::{CacheKeys, LookupStats, LookupStatsSnapshot};
use crate::posts::{NewPost, Post, PostRepository};

/// Lifetime of a cached post: 24 hours.
pub const POST_CACHE_TTL_SECS: u64 = 60 * 60 * 24;

/// Number of posts returned by [`PostLookup::recent`] through the API.
pub const RECENT_POSTS_LIMIT: usize = 10;

// == Options ==
#[derive(Debug, Clone)]
pub struct LookupOptions {
    /// Namespace prefix for cache keys
    pub cache_prefix: String,
    /// Expire the cached copy when a post is deleted
    pub invalidate_on_delete: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            invalidate_on_delete: false,
        }
    }
}

impl From<&Config> for LookupOptions {
    fn from(config: &Config) -> Self {
        Self {
            cache_prefix: config.cache_prefix.clone(),
            invalidate_on_delete: config.invalidate_on_delete,
        }
    }
}

// == Post Lookup ==
/// Post operations over a primary store with a cache layer in front of reads by id.
///
/// A cached post may be up to 24 hours older than the store. Writes go to
/// the store only; unless `invalidate_on_delete` is set, a deleted post stays
/// readable by id until its cache entry expires.
pub struct PostLookup {
    posts: Arc<dyn PostRepository>,
    cache: Arc<dyn CacheLayer>,
    keys: CacheKeys,
    invalidate_on_delete: bool,
    stats: LookupStats,
}

impl PostLookup {
    pub fn new(posts: Arc<dyn PostRepository>, cache: Arc<dyn CacheLayer>) -> Self {
        Self::with_options(posts, cache, LookupOptions::default())
    }

    pub fn with_options(
        posts: Arc<dyn PostRepository>,
        cache: Arc<dyn CacheLayer>,
        options: LookupOptions,
    ) -> Self {
        Self {
            posts,
            cache,
            keys: CacheKeys::posts(options.cache_prefix),
            invalidate_on_delete: options.invalidate_on_delete,
            stats: LookupStats::new(),
        }
    }

    /// Cache key under which the post `id` is stored.
    pub fn cache_key(&self, id: &str) -> String {
        self.keys.key(id)
    }

    // == Get By Id ==
    /// Returns the post `id`, consulting the cache layer before the store.
    ///
    /// A store hit is written back with a 24 hour expiry. A post missing from
    /// both is `Ok(None)` and leaves the cache untouched. Cache layer failures
    /// are returned as-is without falling back to the store.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Option<Post>> {
        if id.is_empty() {
            return Err(AppError::InvalidRequest("Post id cannot be empty".into()));
        }

        let key = self.keys.key(id);

        if let Some(cached) = self.cache.get(&key).await? {
            self.stats.record_hit();
            debug!(%key, "post cache hit");
            return Ok(Some(serde_json::from_str(&cached)?));
        }

        self.stats.record_miss();
        debug!(%key, "post cache miss");

        let Some(post) = self.posts.find_by_id(id).await? else {
            return Ok(None);
        };

        let payload = serde_json::to_string(&post)?;
        self.cache.set_ex(&key, payload, POST_CACHE_TTL_SECS).await?;
        self.stats.record_population();
        debug!(%key, ttl = POST_CACHE_TTL_SECS, "post cached");

        Ok(Some(post))
    }

    // == Create ==
    /// Validates and stores a new post. The cache is not pre-warmed.
    pub async fn create(&self, new_post: NewPost) -> AppResult<Post> {
        new_post.validate()?;
        let post = self.posts.insert(new_post).await?;
        info!(id = %post.id, "post created");
        Ok(post)
    }

    // == Delete ==
    /// Deletes a post from the store, returning whether it existed.
    ///
    /// With `invalidate_on_delete`, the cache entry is expired before the
    /// store delete runs. A cache failure then aborts the call with the post
    /// still stored, so the delete can be retried.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        if id.is_empty() {
            return Err(AppError::InvalidRequest("Post id cannot be empty".into()));
        }

        if self.invalidate_on_delete {
            let key = self.keys.key(id);
            if self.cache.expire(&key, 0).await? {
                self.stats.record_invalidation();
                debug!(%key, "post cache entry invalidated");
            }
        }

        let deleted = self.posts.delete_by_id(id).await?;
        info!(%id, deleted, "post delete");

        Ok(deleted)
    }

    // == Recent ==
    /// Newest posts first, straight from the store.
    pub async fn recent(&self, limit: usize) -> AppResult<Vec<Post>> {
        self.posts.list_recent(limit).await
    }

    pub fn stats(&self) -> LookupStatsSnapshot {
        self.stats.snapshot()
    }
}
