//! RapidAPI post-search client
//!
//! Fetches raw LinkedIn post search pages. HTTP 429 is surfaced as
//! `Error::RateLimit`; every other failure, including an unparseable body,
//! becomes `Error::Upstream`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::VendorSearchResponse;
use crate::config::SearchApiConfig;
use crate::core::PostSearchClient;
use crate::error::{Error, Result};

/// Post-search client for a RapidAPI-hosted LinkedIn data API
pub struct RapidApiSearchClient {
    client: Client,
    config: SearchApiConfig,
}

impl RapidApiSearchClient {
    /// Create a new client
    pub fn new(config: SearchApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("trendfeed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/search-posts", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PostSearchClient for RapidApiSearchClient {
    fn id(&self) -> &str {
        "rapidapi"
    }

    async fn search_posts(
        &self,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<VendorSearchResponse> {
        let start = offset.to_string();
        let count = limit.to_string();

        let mut request = self
            .client
            .get(self.endpoint())
            .query(&[("keyword", query), ("start", start.as_str()), ("count", count.as_str())])
            .header("Accept", "application/json")
            .header("x-rapidapi-host", &self.config.host);

        if let Some(ref key) = self.config.api_key {
            request = request.header("x-rapidapi-key", key.expose_secret());
        }

        debug!(query, limit, offset, "Requesting upstream post search");

        let response = request
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Search request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimit(
                "Search API rate limit reached. Please try again later.".to_string(),
            ));
        }

        if !status.is_success() {
            let text: String = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Search failed with status {}: {}",
                status, text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to read response: {}", e)))?;

        parse_payload(&body)
    }
}

/// Parse a response body, unwrapping a `{ "data": { ... } }` envelope if present
pub fn parse_payload(body: &str) -> Result<VendorSearchResponse> {
    let mut value: Value = serde_json::from_str(body)
        .map_err(|e| Error::Upstream(format!("Failed to parse response: {}", e)))?;

    if value.get("data").is_some_and(Value::is_object) {
        value = value["data"].take();
    }

    serde_json::from_value(value)
        .map_err(|e| Error::Upstream(format!("Failed to parse response: {}", e)))
}
