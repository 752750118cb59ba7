//! Trending cache backends
//!
//! In-process caching via moka. The PostgreSQL backend lives in
//! `crate::database`.

pub mod moka_store;

pub use moka_store::MokaTrendingCache;
