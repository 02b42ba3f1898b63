//! Post Cache - a post API with a read-through cache
//!
//! Reads by id go through an expiring cache layer in front of the primary
//! store; writes go straight to the store.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod posts;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use lookup::PostLookup;
pub use tasks::spawn_cleanup_task;
