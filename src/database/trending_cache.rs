//! Trending cache storage backed by PostgreSQL

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use tracing::trace;

use crate::core::{CacheEntry, EngagementSummary, TrendingCacheStore, TrendingPost};
use crate::database::PostgresPool;
use crate::error::Result;

#[derive(FromRow)]
struct CacheRow {
    cache_key: String,
    query: String,
    posts_data: Json<Vec<TrendingPost>>,
    engagement_summary: Json<EngagementSummary>,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<CacheRow> for CacheEntry {
    fn from(row: CacheRow) -> Self {
        CacheEntry {
            cache_key: row.cache_key,
            query: row.query,
            posts: row.posts_data.0,
            engagement_summary: row.engagement_summary.0,
            cached_at: row.cached_at,
            expires_at: row.expires_at,
        }
    }
}

/// Trending cache in the `trending_posts_cache` table
#[derive(Clone)]
pub struct PgTrendingCache {
    pool: PostgresPool,
}

impl PgTrendingCache {
    /// Create a new store
    pub fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    /// Number of rows, expired ones included
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM trending_posts_cache")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl TrendingCacheStore for PgTrendingCache {
    fn id(&self) -> &str {
        "postgres"
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let row: Option<CacheRow> = sqlx::query_as(r#"
            SELECT cache_key, query, posts_data, engagement_summary, cached_at, expires_at
            FROM trending_posts_cache
            WHERE cache_key = $1
        "#)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        trace!(cache_key = key, hit = row.is_some(), "Trending cache lookup");
        Ok(row.map(CacheEntry::from))
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

        sqlx::query(r#"
            INSERT INTO trending_posts_cache (cache_key, query, posts_data, engagement_summary, cached_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (cache_key) DO UPDATE SET
                query = EXCLUDED.query,
                posts_data = EXCLUDED.posts_data,
                engagement_summary = EXCLUDED.engagement_summary,
                cached_at = EXCLUDED.cached_at,
                expires_at = EXCLUDED.expires_at
        "#)
        .bind(&entry.cache_key)
        .bind(&entry.query)
        .bind(serde_json::to_value(&entry.posts)?)
        .bind(serde_json::to_value(&entry.engagement_summary)?)
        .bind(entry.cached_at)
        .bind(entry.expires_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM trending_posts_cache WHERE cache_key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM trending_posts_cache WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<bool> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(true)
    }
}
