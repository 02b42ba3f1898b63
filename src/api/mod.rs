//! API Module
//!
//! HTTP handlers and routing for the post service REST API.
//!
//! # Endpoints
//! - `GET /posts` - Newest posts
//! - `POST /posts` - Create a post
//! - `GET /posts/:id` - Look up a post by id
//! - `DELETE /posts/:id` - Delete a post
//! - `GET /stats` - Lookup statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
