//! Lookup Statistics Module
//!
//! Counters describing how the read-through path behaves.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Lookup Stats ==
/// Lock-free counters shared by concurrent lookups.
#[derive(Debug, Default)]
pub struct LookupStats {
    hits: AtomicU64,
    misses: AtomicU64,
    populations: AtomicU64,
    invalidations: AtomicU64,
}

impl LookupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_population(&self) {
        self.populations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> LookupStatsSnapshot {
        LookupStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            populations: self.populations.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }
}

// == Snapshot ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupStatsSnapshot {
    /// Lookups answered from the cache layer
    pub hits: u64,
    /// Lookups that fell through to the primary store, one store read each
    pub misses: u64,
    /// Cache entries written after a miss
    pub populations: u64,
    /// Cache entries expired by a delete
    pub invalidations: u64,
}

impl LookupStatsSnapshot {
    /// Returns hits / (hits + misses), or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
