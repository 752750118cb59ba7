//! Core module - Fundamental traits and types for Trendfeed
//!
//! This module defines the core abstractions that enable loose coupling:
//! - Domain types for normalized posts and search results
//! - Provider trait for the upstream post-search API
//! - Storage trait for the trending-post cache

pub mod provider;
pub mod storage;
pub mod types;

// Re-export core traits for convenient access
pub use provider::{PostSearchClient, UPSTREAM_MAX_RESULTS};
pub use storage::{CacheEntry, TrendingCacheStore};
pub use types::*;
