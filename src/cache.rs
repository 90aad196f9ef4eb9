use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// A thread-safe key/value store whose entries expire after a fixed TTL.
///
/// Reads never return an expired value, but expired entries stay in memory
/// until [`TtlCache::purge_expired`] runs (see [`CacheSweeper`]). Values are
/// replaced whole, so a reader sees either the previous or the new payload.
#[derive(Clone)]
pub struct TtlCache<V> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `ttl` - How long a stored value stays visible after `set`.
    pub fn new(ttl: Duration) -> Self {
        Self { entries: Arc::new(RwLock::new(HashMap::new())), ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns a clone of the value stored under `key` if it has not expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries.get(key).filter(|entry| entry.expires_at > now).map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous value and restarting its TTL.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        let expires_at = Instant::now() + self.ttl;
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), CacheEntry { value, expires_at });
    }

    /// Removes every expired entry and returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Background task that periodically purges expired entries from a [`TtlCache`].
///
/// Created at startup and stopped with [`CacheSweeper::shutdown`] during graceful shutdown.
pub struct CacheSweeper {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl CacheSweeper {
    /// Spawns the sweep loop on the current tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `cache` - The cache to sweep.
    /// * `every` - Interval between sweeps. The first sweep runs one interval after start.
    pub fn spawn<V>(cache: TtlCache<V>, every: Duration) -> Self
    where
        V: Clone + Send + Sync + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = cache.purge_expired().await;
                        if removed > 0 {
                            tracing::info!("Cache sweep removed {} expired entries", removed);
                        } else {
                            tracing::debug!("Cache sweep found no expired entries");
                        }
                    }
                }
            }
            tracing::debug!("Cache sweeper stopped");
        });
        Self { cancel, handle }
    }

    /// Stops the sweep loop and waits for the task to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!("Cache sweeper task ended abnormally: {}", e);
        }
    }
}
