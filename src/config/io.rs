//! Configuration I/O - Loading and saving configuration
//!
//! Handles reading configuration from files and environment variables.

use std::path::Path;

use secrecy::SecretString;

use super::types::storage::{PostgresConfig, StorageBackendType};
use super::types::Config;
use crate::error::{Error, Result};

/// Load configuration with layered precedence:
/// 1. Config file (config.json or config.toml) if it exists, otherwise defaults
/// 2. Environment variable overrides (includes .env)
pub fn load_config() -> Result<Config> {
    let config_path = super::paths::config_path();

    let mut config = if config_path.exists() {
        load_config_from_path(&config_path)?
    } else {
        Config::default()
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    parse_config(path, &content)
}

fn parse_config(path: &Path, content: &str) -> Result<Config> {
    let config: Config = if path.extension().is_some_and(|ext| ext == "json") {
        // JSON5 is a superset of JSON and tolerates comments
        json5::from_str(content).map_err(|e| Error::Config(format!("Invalid JSON config: {}", e)))?
    } else if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML config: {}", e)))?
    } else {
        json5::from_str(content)
            .or_else(|_| toml::from_str(content).map_err(|e| Error::Config(e.to_string())))
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
    };

    Ok(config)
}

/// Apply environment variable overrides to an existing config.
///
/// Loads `.env` first. Env vars have the highest precedence:
/// defaults < file < env.
pub fn apply_env_overrides(config: &mut Config) {
    dotenvy::dotenv().ok();

    // Search API overrides
    if let Ok(key) = std::env::var("RAPIDAPI_KEY") {
        if !key.is_empty() {
            config.search_api.api_key = Some(SecretString::from(key));
        }
    }
    if let Ok(host) = std::env::var("RAPIDAPI_HOST") {
        config.search_api.host = host;
    }
    if let Ok(url) = std::env::var("SEARCH_API_BASE_URL") {
        config.search_api.base_url = url;
    }
    if let Ok(timeout) = std::env::var("SEARCH_API_TIMEOUT") {
        if let Ok(v) = timeout.parse() {
            config.search_api.timeout_secs = v;
        }
    }

    // Cache overrides
    if let Ok(hours) = std::env::var("CACHE_FRESH_HOURS") {
        if let Ok(v) = hours.parse() {
            config.cache.fresh_hours = v;
        }
    }
    if let Ok(hours) = std::env::var("CACHE_EMPTY_HOURS") {
        if let Ok(v) = hours.parse() {
            config.cache.empty_hours = v;
        }
    }
    if let Ok(max) = std::env::var("UPSTREAM_MAX_RESULTS") {
        if let Ok(v) = max.parse() {
            config.cache.upstream_max_results = v;
        }
    }

    // Database overrides
    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        let pg = config
            .storage
            .postgres
            .get_or_insert_with(|| PostgresConfig::new(String::new()));
        pg.url = SecretString::from(database_url);
        config.storage.backend = StorageBackendType::Postgres;
    }
    if let Ok(max_conn) = std::env::var("DATABASE_MAX_CONNECTIONS") {
        if let Some(ref mut pg) = config.storage.postgres {
            if let Ok(v) = max_conn.parse() {
                pg.max_connections = v;
            }
        }
    }
    if let Ok(timeout) = std::env::var("DATABASE_TIMEOUT") {
        if let Some(ref mut pg) = config.storage.postgres {
            if let Ok(v) = timeout.parse() {
                pg.connect_timeout_secs = v;
            }
        }
    }

    // Server overrides
    if let Ok(bind) = std::env::var("SERVER_BIND") {
        config.server.bind = bind;
    }
    if let Ok(port) = std::env::var("SERVER_PORT") {
        if let Ok(port) = port.parse() {
            config.server.port = port;
        }
    }

    // Logging overrides
    if let Ok(format) = std::env::var("LOG_FORMAT") {
        if let Ok(format) = format.parse() {
            config.log.format = format;
        }
    }
}

/// Save configuration to a file. Secrets are never written.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    let content = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?
    } else {
        serde_json::to_string_pretty(config)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, content)?;
    Ok(())
}
