//! Lookup Module
//!
//! Cache-aside reads of posts by id, with write pass-through to the primary store.

mod keys;
mod service;
mod stats;

pub use keys::{CacheKeys, POST_KIND};
pub use service::{LookupOptions, PostLookup, POST_CACHE_TTL_SECS, RECENT_POSTS_LIMIT};
pub use stats::{LookupStats, LookupStatsSnapshot};
