//! Process-local primary store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::posts::{NewPost, Post, PostRepository};

/// Posts kept in a shared map. Used when no database is configured and in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<HashMap<String, Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository already holding `posts`.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let map = posts.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            posts: Arc::new(RwLock::new(map)),
        }
    }

    /// Stores a fully formed post, replacing any post with the same id.
    pub async fn put(&self, post: Post) {
        self.posts.write().await.insert(post.id.clone(), post);
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Post>> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn insert(&self, new_post: NewPost) -> AppResult<Post> {
        let post = Post::from_new(new_post);
        self.put(post.clone()).await;
        Ok(post)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<bool> {
        Ok(self.posts.write().await.remove(id).is_some())
    }

    async fn list_recent(&self, limit: usize) -> AppResult<Vec<Post>> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(limit);
        Ok(posts)
    }
}
