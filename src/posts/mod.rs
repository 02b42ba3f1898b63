//! Posts Module
//!
//! The post entity and the primary store that owns it.

mod memory;
mod model;
mod sqlite;

use async_trait::async_trait;

use crate::error::AppResult;

pub use memory::InMemoryPostRepository;
pub use model::{NewPost, Post, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
pub use sqlite::SqlitePostRepository;

// == Post Repository ==
/// Durable source of truth for posts.
///
/// Absence is reported as `Ok(None)` / `Ok(false)`; errors mean the store
/// itself failed.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetches a post by id.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>>;

    /// Persists a new post, assigning its id and creation time.
    async fn insert(&self, new_post: NewPost) -> AppResult<Post>;

    /// Removes a post. Returns whether a post was removed.
    async fn delete_by_id(&self, id: &str) -> AppResult<bool>;

    /// Newest posts first, at most `limit`.
    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Post>>;
}
