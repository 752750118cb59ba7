//! In-process trending cache
//!
//! Uses moka async cache (Send + Sync, TTL-based eviction).
//! No external services required.

use async_trait::async_trait;
use chrono::Utc;
use moka::future::Cache;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::core::{CacheEntry, EngagementSummary, TrendingCacheStore, TrendingPost};
use crate::error::Result;

/// In-process trending cache
///
/// The moka TTL is a retention window, not the freshness window: entries
/// outlive `expires_at` so a rate-limited search can still fall back to them.
#[derive(Clone)]
pub struct MokaTrendingCache {
    entries: Cache<String, CacheEntry>,
}

impl MokaTrendingCache {
    /// Create a cache holding at most `capacity` entries for `retention`
    pub fn new(capacity: u64, retention: Duration) -> Self {
        MokaTrendingCache {
            entries: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(retention)
                .build(),
        }
    }

    /// Create a cache sized from configuration
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            config.memory_capacity,
            Duration::from_secs(config.memory_retention_hours * 60 * 60),
        )
    }
}

impl Default for MokaTrendingCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

#[async_trait]
impl TrendingCacheStore for MokaTrendingCache {
    fn id(&self) -> &str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.get(key).await)
    }

    async fn put(
        &self,
        key: &str,
        query: &str,
        posts: &[TrendingPost],
        engagement_summary: &EngagementSummary,
        expiration_hours: i64,
    ) -> Result<CacheEntry> {
        let entry = CacheEntry::new(
            key,
            query,
            posts.to_vec(),
            engagement_summary.clone(),
            expiration_hours,
            Utc::now(),
        );
        self.entries.insert(key.to_string(), entry.clone()).await;
        Ok(entry)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.invalidate(key).await;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let now = Utc::now();
        let expired: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_fresh(now))
            .map(|(key, _)| key)
            .collect();

        for key in &expired {
            self.entries.invalidate(key.as_str()).await;
        }

        Ok(expired.len() as u64)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
