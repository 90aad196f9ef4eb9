use std::sync::Arc;

use crate::cache::TtlCache;
use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::types::CachedPayload;

/// Response cache shared by the resource endpoints. Payloads sit behind an
/// `Arc` so a hit clones a pointer, not the listing.
pub type ResponseCache = TtlCache<Arc<CachedPayload>>;

/// The shared application state.
///
/// Cloned into every handler by axum; all members are cheap to clone and point
/// at the same underlying pool, cache and counters.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Request and cache counters.
    pub metrics: Metrics,
    /// Search and directory responses keyed by their normalized query.
    ///
    /// Constructed here and swept by a `CacheSweeper` that `main` owns, so tests
    /// can build a state with a fresh cache and no background task.
    pub cache: ResponseCache,
}

impl AppState {
    /// Creates a new `AppState` with an empty response cache using `config.cache.ttl_secs`.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let cache = TtlCache::new(config.cache.ttl());
        Self { db, config: Arc::new(config), metrics: Metrics::new(), cache }
    }
}
