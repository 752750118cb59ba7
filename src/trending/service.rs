//! Cache-aside ranking service
//!
//! Lookup order for a request:
//! 1. fresh, non-empty cache entry under `<query>:<limit>:<offset>`
//! 2. upstream search (limit capped), normalized, ranked and written back
//! 3. on upstream 429 only: one read of the zero-offset key, stale allowed
//!
//! Store failures never fail a search; they are logged and the request
//! continues as if the cache were empty.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::aggregator::summarize;
use super::client::RapidApiSearchClient;
use super::normalizer::normalize;
use super::ranking::{filter_by_engagement, rank_by_engagement};
use crate::cache::MokaTrendingCache;
use crate::config::{CacheConfig, Config, StorageBackendType};
use crate::core::{
    CacheEntry, PostSearchClient, SearchRequest, SearchResponse, TrendingCacheStore,
    UPSTREAM_MAX_RESULTS,
};
use crate::database::{init_pool, PgTrendingCache};
use crate::error::{Error, Result};

/// Warning attached to results served from a stale entry
pub const STALE_RESULTS_WARNING: &str =
    "Search API rate limit reached. Showing cached results that may be out of date.";

/// Cache key for a query page.
///
/// The engagement threshold is applied when reading, so it is not part of
/// the key. The query is used verbatim; "AI" and "ai " are different keys.
pub fn cache_key(query: &str, limit: u32, offset: u32) -> String {
    format!("{}:{}:{}", query, limit, offset)
}

/// Trending-post search with a cache in front of the upstream API
#[derive(Clone)]
pub struct TrendingService {
    store: Arc<dyn TrendingCacheStore>,
    client: Arc<dyn PostSearchClient>,
    settings: CacheConfig,
}

impl TrendingService {
    /// Create a new service
    pub fn new(
        store: Arc<dyn TrendingCacheStore>,
        client: Arc<dyn PostSearchClient>,
        settings: CacheConfig,
    ) -> Self {
        TrendingService {
            store,
            client,
            settings,
        }
    }

    /// Build the cache store and upstream client described by `config`
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn TrendingCacheStore> = match config.storage.backend {
            StorageBackendType::Memory => Arc::new(MokaTrendingCache::from_config(&config.cache)),
            StorageBackendType::Postgres => {
                let pg_config = config.storage.postgres.as_ref().ok_or_else(|| {
                    Error::Config(
                        "PostgreSQL backend selected but storage.postgres is not configured".to_string(),
                    )
                })?;
                Arc::new(PgTrendingCache::new(init_pool(pg_config).await?))
            }
        };

        let client = Arc::new(RapidApiSearchClient::new(config.search_api.clone())?);
        info!(store = store.id(), "Trending service ready");

        Ok(Self::new(store, client, config.cache.clone()))
    }

    /// ID of the cache backend
    pub fn store_id(&self) -> &str {
        self.store.id()
    }

    /// Search for trending posts
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        if request.query.trim().is_empty() {
            return Err(Error::InvalidInput("Search query is required".to_string()));
        }

        let key = cache_key(&request.query, request.limit, request.offset);

        if let Some(entry) = self.lookup_fresh(&key).await {
            info!(cache_key = %key, posts = entry.posts.len(), "Serving trending posts from cache");
            return Ok(response_from_entry(entry, request.min_engagement, None));
        }

        // Configured ceiling can lower the quota but never lift it past the hard cap
        let ceiling = self.settings.upstream_max_results.clamp(1, UPSTREAM_MAX_RESULTS);
        let upstream_limit = request.limit.min(ceiling);
        let payload = match self
            .client
            .search_posts(&request.query, upstream_limit, request.offset)
            .await
        {
            Ok(payload) => payload,
            Err(err) if err.is_rate_limited() => {
                warn!(cache_key = %key, "Upstream rate limited, trying stale cache");
                return self.rescue_stale(request, err).await;
            }
            Err(err) => return Err(err),
        };

        let mut posts = normalize(&payload);
        rank_by_engagement(&mut posts);
        let summary = summarize(&posts);

        let expiration_hours = if posts.is_empty() {
            self.settings.empty_hours
        } else {
            self.settings.fresh_hours
        };

        let cache_expires_at = match self
            .store
            .put(&key, &request.query, &posts, &summary, expiration_hours)
            .await
        {
            Ok(entry) => Some(entry.expires_at),
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Failed to cache trending posts");
                None
            }
        };

        info!(
            cache_key = %key,
            posts = posts.len(),
            expiration_hours,
            "Fetched trending posts from upstream"
        );

        let posts = filter_by_engagement(posts, request.min_engagement);
        let total_results = payload.total().unwrap_or(posts.len() as u64);

        Ok(SearchResponse {
            posts,
            total_results,
            cached: false,
            cache_expires_at,
            engagement_summary: Some(summary),
            warning: None,
        })
    }

    /// Drop expired entries from the store
    pub async fn purge_expired(&self) -> Result<u64> {
        let purged = self.store.purge_expired().await?;
        if purged > 0 {
            info!(purged, "Purged expired trending cache entries");
        }
        Ok(purged)
    }

    /// Whether the cache backend is reachable
    pub async fn store_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Cache health check failed");
                false
            }
        }
    }

    async fn lookup_fresh(&self, key: &str) -> Option<CacheEntry> {
        let entry = match self.store.get(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                warn!(cache_key = key, error = %e, "Cache read failed, treating as miss");
                return None;
            }
        };

        // An empty entry is never served; evict it so the next call goes upstream
        if entry.posts.is_empty() {
            debug!(cache_key = key, "Evicting empty cache entry");
            if let Err(e) = self.store.delete(key).await {
                warn!(cache_key = key, error = %e, "Failed to evict empty cache entry");
            }
            return None;
        }

        if !entry.is_fresh(Utc::now()) {
            debug!(cache_key = key, expires_at = %entry.expires_at, "Cache entry expired");
            return None;
        }

        Some(entry)
    }

    // TODO: replace the zero-offset guess with a per-query index of the last good entry
    async fn rescue_stale(&self, request: &SearchRequest, original: Error) -> Result<SearchResponse> {
        let fallback_key = cache_key(&request.query, request.limit, 0);

        match self.store.get(&fallback_key).await {
            Ok(Some(entry)) if !entry.posts.is_empty() => {
                info!(cache_key = %fallback_key, "Serving stale trending posts after rate limit");
                Ok(response_from_entry(
                    entry,
                    request.min_engagement,
                    Some(STALE_RESULTS_WARNING.to_string()),
                ))
            }
            Ok(_) => Err(original),
            Err(e) => {
                warn!(cache_key = %fallback_key, error = %e, "Stale cache read failed");
                Err(original)
            }
        }
    }
}

fn response_from_entry(
    entry: CacheEntry,
    min_engagement: u64,
    warning: Option<String>,
) -> SearchResponse {
    let mut posts = entry.posts;
    rank_by_engagement(&mut posts);
    let posts = filter_by_engagement(posts, min_engagement);

    SearchResponse {
        total_results: posts.len() as u64,
        posts,
        cached: true,
        cache_expires_at: Some(entry.expires_at),
        engagement_summary: Some(entry.engagement_summary),
        warning,
    }
}
