//! Time-bounded memoization of fetch outcomes
//!
//! Outcomes are keyed by the full filter state plus the API key. A stored
//! outcome, including a failure, is served until it is older than the
//! configured ttl. Concurrent misses for one key are not coalesced; each
//! performs its own fetch and the last write wins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::app::client::ArticleSource;
use crate::app::models::{Article, FilterState};
use crate::app::query::NewsRequest;
use crate::auth::ApiToken;
use crate::errors::FetchResult;

use super::config::CacheConfig;
use super::stats::CacheStats;

/// A cached fetch outcome; the article list is shared, never copied
pub type CachedOutcome = FetchResult<Arc<[Article]>>;

/// Identity of a result set: every filter field plus the key used to fetch it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    filter: FilterState,
    token: ApiToken,
}

impl CacheKey {
    /// Key for a filter state fetched with `token`
    pub fn new(filter: FilterState, token: ApiToken) -> Self {
        Self { filter, token }
    }

    /// Key for the filter and token a request was built from
    pub fn for_request(request: &NewsRequest) -> Self {
        Self::new(request.filter().clone(), request.token().clone())
    }

    /// The filter half of the key
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    outcome: CachedOutcome,
    fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, config: &CacheConfig, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < config.ttl
    }
}

/// In-memory response cache
#[derive(Debug, Default)]
pub struct ResultCache {
    config: CacheConfig,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    /// Create an empty cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get the cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Stored outcome for `key` if it is still fresh
    pub async fn lookup(&self, key: &CacheKey) -> Option<CachedOutcome> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(&self.config, Instant::now()))
            .map(|entry| entry.outcome.clone())
    }

    /// Store an outcome stamped with the current time
    pub async fn store(&self, key: CacheKey, outcome: CachedOutcome) {
        let entry = CacheEntry {
            outcome,
            fetched_at: Instant::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Return the fresh outcome for `request`, fetching it on a miss
    ///
    /// The key is derived from the filter and token the request was built
    /// from. On a miss, expired entries are dropped, the source is called
    /// exactly once and whatever it returns, success or failure, is stored.
    /// The lock is not held while fetching.
    pub async fn get_or_fetch<S: ArticleSource>(
        &self,
        request: &NewsRequest,
        source: &S,
    ) -> CachedOutcome {
        let key = CacheKey::for_request(request);
        if let Some(outcome) = self.lookup(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit for {}", request);
            return outcome;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("Cache miss for {}", request);
        self.purge_expired().await;

        let outcome: CachedOutcome = source.fetch(request).await.map(Arc::from);
        self.store(key, outcome.clone()).await;
        outcome
    }

    /// Drop entries older than the ttl. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(&self.config, now));
        let removed = before - entries.len();
        if removed > 0 {
            info!("Purged {} expired cache entries", removed);
        }
        removed
    }

    /// Forget everything
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Current usage figures
    pub async fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read().await;
        CacheStats {
            entries: entries.len(),
            fresh_entries: entries
                .values()
                .filter(|entry| entry.is_fresh(&self.config, now))
                .count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
