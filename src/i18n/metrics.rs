//! Bundle loading metrics.
//!
//! Counts cache hits and misses of the per-locale bundle cache, and how many
//! bundle loads were attempted and failed.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Bundle loading counters for one locale service.
#[derive(Debug, Default)]
pub struct BundleMetrics {
    /// Number of times a bundle was served from the cache
    cache_hits: AtomicUsize,

    /// Number of times a bundle had to be loaded
    cache_misses: AtomicUsize,

    /// Number of bundle loads attempted
    loads: AtomicUsize,

    /// Number of bundle loads that failed
    load_failures: AtomicUsize,
}

impl BundleMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a bundle served from the cache.
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a bundle not found in the cache.
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a bundle load attempt.
    pub fn record_load(&self) {
        self.loads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed bundle load.
    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            loads: self.loads(),
            load_failures: self.load_failures(),
        }
    }
}

/// Snapshot of bundle loading statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of cache hits
    pub cache_hits: usize,

    /// Number of cache misses
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    /// Number of bundle loads attempted
    pub loads: usize,

    /// Number of bundle loads that failed
    pub load_failures: usize,
}
