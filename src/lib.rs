//! # Trendfeed
//!
//! Trending-post search over a rate-limited LinkedIn data API.
//!
//! ## Features
//!
//! - **Normalization:** Deeply nested vendor payloads flattened into `TrendingPost`
//! - **Engagement Ranking:** Posts ordered by total reactions with a threshold filter
//! - **Cache-Aside Storage:** PostgreSQL or in-process moka, with stale fallback on 429
//! - **HTTP + CLI:** axum routes and a clap command line over the same service

pub mod api;
pub mod cache;
pub mod config;
pub mod core;
pub mod database;
pub mod error;
pub mod logging;
pub mod trending;

pub use config::Config;
pub use error::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = env!("CARGO_PKG_NAME");
