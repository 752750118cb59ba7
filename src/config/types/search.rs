//! Upstream search API and cache configuration types

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Upstream post-search API configuration (RapidAPI-style gateway)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchApiConfig {
    /// API key sent as `x-rapidapi-key`
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
    /// Value of the `x-rapidapi-host` header
    #[serde(default = "default_host")]
    pub host: String,
    /// Base URL; `/search-posts` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for SearchApiConfig {
    fn default() -> Self {
        SearchApiConfig {
            api_key: None,
            host: default_host(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_host() -> String {
    "linkedin-data-api.p.rapidapi.com".to_string()
}

fn default_base_url() -> String {
    "https://linkedin-data-api.p.rapidapi.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Cache freshness and upstream quota settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of an entry that holds posts
    #[serde(default = "default_fresh_hours")]
    pub fresh_hours: i64,
    /// Lifetime of an entry with no posts
    #[serde(default = "default_empty_hours")]
    pub empty_hours: i64,
    /// Ceiling on results requested from the upstream per call
    #[serde(default = "default_upstream_max_results")]
    pub upstream_max_results: u32,
    /// Maximum entries held by the in-process store
    #[serde(default = "default_memory_capacity")]
    pub memory_capacity: u64,
    /// How long the in-process store keeps entries past creation, stale ones included
    #[serde(default = "default_memory_retention_hours")]
    pub memory_retention_hours: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            fresh_hours: default_fresh_hours(),
            empty_hours: default_empty_hours(),
            upstream_max_results: default_upstream_max_results(),
            memory_capacity: default_memory_capacity(),
            memory_retention_hours: default_memory_retention_hours(),
        }
    }
}

fn default_fresh_hours() -> i64 {
    24
}

fn default_empty_hours() -> i64 {
    6
}

fn default_upstream_max_results() -> u32 {
    crate::core::UPSTREAM_MAX_RESULTS
}

fn default_memory_capacity() -> u64 {
    1000
}

fn default_memory_retention_hours() -> u64 {
    24 * 7
}
