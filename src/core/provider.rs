//! Search provider trait - Abstract interface for the upstream post-search API
//!
//! The ranking service only needs "give me the raw payload for this query
//! page". Keeping that behind a trait lets the HTTP client be swapped for a
//! stub in tests or for a different vendor.

use async_trait::async_trait;

use crate::error::Result;
use crate::trending::VendorSearchResponse;

/// Hard ceiling on results requested from the upstream per call
pub const UPSTREAM_MAX_RESULTS: u32 = 20;

/// Abstract interface for post-search backends
///
/// Implementations must report HTTP 429 as `Error::RateLimit` so the caller
/// can distinguish it from other failures.
#[async_trait]
pub trait PostSearchClient: Send + Sync {
    /// Get the provider ID
    fn id(&self) -> &str;

    /// Fetch one page of raw search results
    async fn search_posts(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<VendorSearchResponse>;
}
