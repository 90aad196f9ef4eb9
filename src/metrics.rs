use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request and cache counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub resource_searches: Arc<AtomicU64>,
    pub directory_listings: Arc<AtomicU64>,
    pub cache_hits: Arc<AtomicU64>,
    pub cache_misses: Arc<AtomicU64>,
    pub relaxation_attempts: Arc<AtomicU64>,
    pub query_failures: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            resource_searches: Arc::new(AtomicU64::new(0)),
            directory_listings: Arc::new(AtomicU64::new(0)),
            cache_hits: Arc::new(AtomicU64::new(0)),
            cache_misses: Arc::new(AtomicU64::new(0)),
            relaxation_attempts: Arc::new(AtomicU64::new(0)),
            query_failures: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_resource_searches(&self) {
        self.resource_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_directory_listings(&self) {
        self.directory_listings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_cache_misses(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_relaxation_attempts(&self, count: u64) {
        self.relaxation_attempts.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_query_failures(&self) {
        self.query_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// `cache_entries` is passed in because reading the cache size needs its lock.
    pub fn get_snapshot(&self, cache_entries: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            resource_searches: self.resource_searches.load(Ordering::Relaxed),
            directory_listings: self.directory_listings.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            relaxation_attempts: self.relaxation_attempts.load(Ordering::Relaxed),
            query_failures: self.query_failures.load(Ordering::Relaxed),
            cache_entries,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub resource_searches: u64,
    pub directory_listings: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub relaxation_attempts: u64,
    pub query_failures: u64,
    pub cache_entries: usize,
    pub uptime_seconds: u64,
}
