//! Configuration module
//!
//! - types/mod.rs: Core configuration types (Config, ServerConfig, LogConfig)
//! - types/search.rs: Upstream search API and cache settings
//! - types/storage.rs: Storage backend configuration
//! - io.rs: Configuration loading and saving
//! - validation.rs: Configuration validation
//! - paths.rs: Configuration file paths

mod io;
mod paths;
mod types;
mod validation;

// Re-export core config types
pub use types::{Config, LogConfig, LogFormat, ServerConfig};

// Re-export search types
pub use types::search::{CacheConfig, SearchApiConfig};

// Re-export storage types
pub use types::storage::{PostgresConfig, StorageBackendType, StorageConfig};

pub type DatabaseConfig = PostgresConfig;

// Re-export IO and utilities
pub use io::{apply_env_overrides, load_config, load_config_from_path, save_config};
pub use paths::{config_dir, config_file_in, config_path};
pub use validation::{validate_config, ConfigValidationResult, ValidationIssue};
