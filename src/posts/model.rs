//! Post entity and its creation payload.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Maximum title length in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Maximum content length in characters.
pub const MAX_CONTENT_LENGTH: usize = 256;

// == Post ==
/// A stored post. The id is opaque to everything except the primary store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Builds a post with a fresh id and creation time.
    pub fn from_new(new_post: NewPost) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), new_post)
    }

    /// Builds a post under a caller-chosen id.
    ///
    /// Timestamps are kept at microsecond precision so they survive storage unchanged.
    pub fn with_id(id: impl Into<String>, new_post: NewPost) -> Self {
        Self {
            id: id.into(),
            title: new_post.title,
            content: new_post.content,
            created_at: Utc::now().trunc_subsecs(6),
            updated_at: None,
        }
    }
}

// == New Post ==
/// Fields a caller supplies when creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Rejects titles or bodies longer than 256 characters.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(AppError::InvalidRequest(format!(
                "Title exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        if self.content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(AppError::InvalidRequest(format!(
                "Content exceeds maximum length of {} characters",
                MAX_CONTENT_LENGTH
            )));
        }
        Ok(())
    }
}
