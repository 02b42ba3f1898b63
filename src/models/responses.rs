//! Response DTOs for the post API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::lookup::LookupStatsSnapshot;

/// Response body for `DELETE /posts/:id`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Human readable outcome
    pub message: String,
    /// The id that was targeted
    pub id: String,
    /// Whether a post was actually removed
    pub deleted: bool,
}

impl DeleteResponse {
    pub fn new(id: impl Into<String>, deleted: bool) -> Self {
        let id = id.into();
        let message = if deleted {
            format!("Post '{}' deleted successfully", id)
        } else {
            format!("Post '{}' did not exist", id)
        };
        Self {
            message,
            id,
            deleted,
        }
    }
}

/// Response body for the stats endpoint (`GET /stats`)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that fell through to the store
    pub misses: u64,
    /// Cache entries written after a miss
    pub populations: u64,
    /// Cache entries expired on delete
    pub invalidations: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Entries held by the in-process cache, when that backend is in use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_entries: Option<usize>,
}

impl StatsResponse {
    pub fn new(stats: LookupStatsSnapshot, cache_entries: Option<usize>) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            populations: stats.populations,
            invalidations: stats.invalidations,
            hit_rate: stats.hit_rate(),
            cache_entries,
        }
    }
}

/// Response body for the health endpoint (`GET /health`)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
