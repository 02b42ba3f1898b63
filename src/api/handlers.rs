//! API Handlers
//!
//! HTTP request handlers for each post service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::{CacheLayer, MemoryCache, UpstashCache};
use crate::config::{CacheBackend, Config};
use crate::error::{AppError, AppResult};
use crate::lookup::{LookupOptions, PostLookup, RECENT_POSTS_LIMIT};
use crate::models::{CreatePostRequest, DeleteResponse, HealthResponse, StatsResponse};
use crate::posts::{InMemoryPostRepository, Post, PostRepository, SqlitePostRepository};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Post operations with the read-through cache
    pub posts: Arc<PostLookup>,
    /// Handle on the in-process cache, when that backend is in use
    pub memory_cache: Option<MemoryCache>,
}

impl AppState {
    pub fn new(posts: PostLookup) -> Self {
        Self {
            posts: Arc::new(posts),
            memory_cache: None,
        }
    }

    /// State whose lookup uses `cache`, keeping the handle for stats and cleanup.
    pub fn with_memory_cache(
        repository: Arc<dyn PostRepository>,
        cache: MemoryCache,
        options: LookupOptions,
    ) -> Self {
        let lookup = PostLookup::with_options(repository, Arc::new(cache.clone()), options);
        Self {
            posts: Arc::new(lookup),
            memory_cache: Some(cache),
        }
    }

    /// Builds the primary store and cache layer described by `config`.
    pub async fn from_config(config: &Config) -> AppResult<Self> {
        config.validate()?;

        let repository: Arc<dyn PostRepository> = match &config.database_url {
            Some(url) => Arc::new(SqlitePostRepository::connect(url).await?),
            None => Arc::new(InMemoryPostRepository::new()),
        };
        let options = LookupOptions::from(config);

        match config.cache_backend {
            CacheBackend::Memory => Ok(Self::with_memory_cache(
                repository,
                MemoryCache::new(config.cache_max_entries),
                options,
            )),
            CacheBackend::Upstash => {
                let (Some(url), Some(token)) = (&config.upstash_url, &config.upstash_token) else {
                    return Err(AppError::Config("missing Upstash credentials".into()));
                };
                let cache: Arc<dyn CacheLayer> = Arc::new(UpstashCache::new(url, token)?);
                Ok(Self::new(PostLookup::with_options(repository, cache, options)))
            }
        }
    }
}

/// Handler for GET /posts
///
/// Lists the newest posts.
pub async fn list_posts_handler(State(state): State<AppState>) -> AppResult<Json<Vec<Post>>> {
    let posts = state.posts.recent(RECENT_POSTS_LIMIT).await?;
    Ok(Json(posts))
}

/// Handler for GET /posts/:id
///
/// Responds with the post, or `null` when no such post exists.
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Option<Post>>> {
    let post = state.posts.get_by_id(&id).await?;
    Ok(Json(post))
}

/// Handler for POST /posts
pub async fn create_post_handler(
    State(state): State<AppState>,
    Json(req): Json<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<Post>)> {
    let post = state.posts.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Handler for DELETE /posts/:id
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = state.posts.delete(&id).await?;
    Ok(Json(DeleteResponse::new(id, deleted)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache_entries = match &state.memory_cache {
        Some(cache) => Some(cache.len().await),
        None => None,
    };
    Json(StatsResponse::new(state.posts.stats(), cache_entries))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
