//! Error types for Trendfeed

use thiserror::Error;

/// Result type alias using Trendfeed's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Trendfeed
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream search API failure (non-2xx, transport, unparseable body)
    #[error("Search API error: {0}")]
    Upstream(String),

    /// Upstream signalled HTTP 429
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cache store error that is not a database error
    #[error("Cache error: {0}")]
    Cache(String),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check if error is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Check if the upstream asked us to back off
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimit(_))
    }
}
