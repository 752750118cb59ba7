//! PostgreSQL database connection and migrations

use crate::config::DatabaseConfig;
use crate::error::Result;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// PostgreSQL connection pool type alias
pub type PostgresPool = PgPool;

/// Initialize the PostgreSQL connection pool
pub async fn init_pool(config: &DatabaseConfig) -> Result<PostgresPool> {
    info!("Initializing PostgreSQL connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(config.url.expose_secret())
        .await?;

    // Verify connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    info!("PostgreSQL connection pool initialized successfully");
    Ok(pool)
}

/// Database migrations
pub mod migrations {
    use super::*;

    /// Run all migrations
    pub async fn run(pool: &PgPool) -> Result<()> {
        info!("Running database migrations");

        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS trending_posts_cache (
                cache_key TEXT PRIMARY KEY,
                query TEXT NOT NULL,
                posts_data JSONB NOT NULL DEFAULT '[]'::jsonb,
                engagement_summary JSONB NOT NULL DEFAULT '{}'::jsonb,
                cached_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                expires_at TIMESTAMPTZ NOT NULL
            )
        "#)
        .execute(pool)
        .await?;

        // Purge and freshness checks both filter on expiry
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_trending_posts_cache_expires_at ON trending_posts_cache(expires_at)"
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_trending_posts_cache_query ON trending_posts_cache(query)"
        )
        .execute(pool)
        .await?;

        info!("Database migrations completed");
        Ok(())
    }
}
