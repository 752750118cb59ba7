//! Storage trait - Abstract interface for the trending-post cache
//!
//! This module defines the `TrendingCacheStore` trait that allows the
//! ranking service to work with different cache backends:
//! - PostgreSQL (`trending_posts_cache` table) for shared deployments
//! - In-process moka cache for single-node and development use
//!
//! Stores hand back entries whether or not they have expired. Freshness is
//! decided by the caller, which lets the rate-limit rescue read stale rows.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::types::{EngagementSummary, TrendingPost};
use crate::error::Result;

/// A cached, ranked result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// Composite key the entry is stored under
    pub cache_key: String,
    /// Query the entry was produced for
    pub query: String,
    /// Normalized posts, not filtered by engagement
    pub posts: Vec<TrendingPost>,
    /// Aggregates computed when the entry was written
    pub engagement_summary: EngagementSummary,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Build an entry stamped at `now` that expires after `expiration_hours`
    pub fn new(
        cache_key: impl Into<String>,
        query: impl Into<String>,
        posts: Vec<TrendingPost>,
        engagement_summary: EngagementSummary,
        expiration_hours: i64,
        now: DateTime<Utc>,
    ) -> Self {
        CacheEntry {
            cache_key: cache_key.into(),
            query: query.into(),
            posts,
            engagement_summary,
            cached_at: now,
            expires_at: now + Duration::hours(expiration_hours),
        }
    }

    /// Whether the entry is still fresh at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Abstract interface for the trending-post cache
///
/// Writes are plain upserts; concurrent writers for the same key race and
/// the last one wins.
#[async_trait]
pub trait TrendingCacheStore: Send + Sync {
    /// Get the backend ID
    fn id(&self) -> &str;

    /// Read an entry by key, expired or not
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Insert or replace the entry under `key`
    async fn put(
        &self,
        key: &str,
        query: &str,
        posts: &[TrendingPost],
        engagement_summary: &EngagementSummary,
        expiration_hours: i64,
    ) -> Result<CacheEntry>;

    /// Remove an entry
    async fn delete(&self, key: &str) -> Result<()>;

    /// Remove every expired entry, returning how many were removed
    async fn purge_expired(&self) -> Result<u64>;

    /// Health check
    async fn health_check(&self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_entry_expiry() {
        let now = Utc::now();
        let entry = CacheEntry::new("ai:10:0", "ai", vec![], EngagementSummary::default(), 24, now);

        assert_eq!(entry.expires_at - entry.cached_at, Duration::hours(24));
        assert!(entry.is_fresh(now));
        assert!(entry.is_fresh(now + Duration::hours(23)));
        assert!(!entry.is_fresh(now + Duration::hours(24)));
    }
}
