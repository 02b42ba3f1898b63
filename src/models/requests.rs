//! Request DTOs for the post API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::posts::NewPost;

/// Request body for `POST /posts`.
///
/// Id and timestamps are assigned by the store, so they are not accepted here.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        NewPost::new(req.title, req.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"title": "Hello", "content": "World"}"#;
        let req: CreatePostRequest = serde_json::from_str(json).unwrap();

        let new_post = NewPost::from(req);
        assert_eq!(new_post.title, "Hello");
        assert_eq!(new_post.content, "World");
    }

    #[test]
    fn test_create_request_requires_content() {
        let json = r#"{"title": "Hello"}"#;
        assert!(serde_json::from_str::<CreatePostRequest>(json).is_err());
    }

    #[test]
    fn test_create_request_rejects_client_id() {
        let json = r#"{"id": "p1", "title": "Hello", "content": "World"}"#;
        assert!(serde_json::from_str::<CreatePostRequest>(json).is_err());
    }
}
