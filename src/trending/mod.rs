//! Trending posts
//!
//! - vendor.rs: Raw upstream response shapes
//! - normalizer.rs: Vendor response to `TrendingPost`
//! - aggregator.rs: Engagement summary over a result set
//! - ranking.rs: Ordering and engagement filtering
//! - client.rs: RapidAPI post-search client
//! - service.rs: Cache-aside ranking service

pub mod aggregator;
pub mod client;
pub mod normalizer;
pub mod ranking;
pub mod service;
pub mod vendor;

pub use aggregator::summarize;
pub use client::{parse_payload, RapidApiSearchClient};
pub use normalizer::{extract_hashtags, normalize, normalize_update};
pub use ranking::{filter_by_engagement, rank_by_engagement};
pub use service::{cache_key, TrendingService, STALE_RESULTS_WARNING};
pub use vendor::VendorSearchResponse;
