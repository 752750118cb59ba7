//! Database module - PostgreSQL
//!
//! Provides storage for:
//! - `trending_posts_cache`: Normalized search results shared across instances

mod postgres;
mod trending_cache;

pub use postgres::{init_pool, migrations, PostgresPool};
pub use trending_cache::PgTrendingCache;
