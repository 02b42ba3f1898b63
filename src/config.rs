//! Configuration Module
//!
//! Handles loading and validating service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::MAX_KEY_LENGTH;
use crate::error::{AppError, AppResult};
use crate::lookup::CacheKeys;

/// Default cache key namespace.
pub const DEFAULT_CACHE_PREFIX: &str = "turbo-kit";

// == Cache Backend ==
/// Which cache layer implementation to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheBackend {
    /// In-process TTL store
    #[default]
    Memory,
    /// Redis reached through the Upstash REST API
    Upstash,
}

impl FromStr for CacheBackend {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "upstash" | "redis" => Ok(CacheBackend::Upstash),
            other => Err(AppError::Config(format!("unknown cache backend '{other}'"))),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// SQLite URL for the primary store; `None` keeps posts in memory
    pub database_url: Option<String>,
    /// Cache layer implementation
    pub cache_backend: CacheBackend,
    /// Upstash REST endpoint
    pub upstash_url: Option<String>,
    /// Upstash REST bearer token
    pub upstash_token: Option<String>,
    /// Maximum number of entries the in-memory cache can hold
    pub cache_max_entries: usize,
    /// Memory cache expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Namespace prefix for cache keys
    pub cache_prefix: String,
    /// Expire the cached copy of a post when it is deleted
    pub invalidate_on_delete: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_URL` - SQLite URL (default: unset, in-memory store)
    /// - `CACHE_BACKEND` - `memory` or `upstash` (default: memory)
    /// - `UPSTASH_REDIS_REST_URL` / `UPSTASH_REDIS_REST_TOKEN` - Upstash credentials
    /// - `CACHE_MAX_ENTRIES` - Memory cache capacity (default: 10000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `CACHE_PREFIX` - Cache key namespace (default: turbo-kit)
    /// - `INVALIDATE_ON_DELETE` - `true` to expire cached posts on delete (default: false)
    ///
    /// Unparseable values fall back to their defaults; use [`Config::validate`]
    /// to reject combinations that cannot start.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            database_url: non_empty_var("DATABASE_URL"),
            cache_backend: parse_var("CACHE_BACKEND").unwrap_or(defaults.cache_backend),
            upstash_url: non_empty_var("UPSTASH_REDIS_REST_URL"),
            upstash_token: non_empty_var("UPSTASH_REDIS_REST_TOKEN"),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            cache_prefix: non_empty_var("CACHE_PREFIX").unwrap_or(defaults.cache_prefix),
            invalidate_on_delete: parse_var("INVALIDATE_ON_DELETE")
                .unwrap_or(defaults.invalidate_on_delete),
        }
    }

    /// Checks that the configuration describes a service that can start.
    pub fn validate(&self) -> AppResult<()> {
        if self.cache_prefix.trim().is_empty() {
            return Err(AppError::Config("cache prefix cannot be empty".into()));
        }
        // The longest id a post key can still hold must be at least one byte.
        let key_overhead = CacheKeys::posts(self.cache_prefix.as_str()).key("").len();
        if key_overhead >= MAX_KEY_LENGTH {
            return Err(AppError::Config(format!(
                "CACHE_PREFIX is too long: post keys are limited to {MAX_KEY_LENGTH} bytes"
            )));
        }

        match self.cache_backend {
            CacheBackend::Memory => {
                if self.cache_max_entries == 0 {
                    return Err(AppError::Config(
                        "CACHE_MAX_ENTRIES must be greater than zero".into(),
                    ));
                }
                if self.cleanup_interval == 0 {
                    return Err(AppError::Config(
                        "CLEANUP_INTERVAL must be greater than zero".into(),
                    ));
                }
            }
            CacheBackend::Upstash => {
                if self.upstash_url.is_none() || self.upstash_token.is_none() {
                    return Err(AppError::Config(
                        "UPSTASH_REDIS_REST_URL and UPSTASH_REDIS_REST_TOKEN are required for the upstash backend"
                            .into(),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            database_url: None,
            cache_backend: CacheBackend::Memory,
            upstash_url: None,
            upstash_token: None,
            cache_max_entries: 10_000,
            cleanup_interval: 1,
            cache_prefix: DEFAULT_CACHE_PREFIX.to_string(),
            invalidate_on_delete: false,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
