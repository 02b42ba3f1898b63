//! API Routes
//!
//! Configures the Axum router with all post service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_post_handler, delete_post_handler, get_post_handler, health_handler,
    list_posts_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /posts` - Newest posts
/// - `POST /posts` - Create a post
/// - `GET /posts/:id` - Read-through lookup by id
/// - `DELETE /posts/:id` - Delete a post
/// - `GET /stats` - Lookup statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/posts", get(list_posts_handler).post(create_post_handler))
        .route(
            "/posts/:id",
            get(get_post_handler).delete(delete_post_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
