//! Configuration validation
//!
//! Validates configuration and reports issues.

use secrecy::ExposeSecret;

use super::types::storage::StorageBackendType;
use super::types::Config;
use crate::core::UPSTREAM_MAX_RESULTS;

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ConfigValidationResult {
    /// Whether the config is valid
    pub valid: bool,
    /// Validation errors (critical)
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (non-critical)
    pub warnings: Vec<ValidationIssue>,
}

impl ConfigValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        ConfigValidationResult {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn with_error(mut self, issue: ValidationIssue) -> Self {
        self.valid = false;
        self.errors.push(issue);
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, issue: ValidationIssue) -> Self {
        self.warnings.push(issue);
        self
    }
}

/// A validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the config field
    pub path: String,
    /// Issue message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " ({})", suggestion)?;
        }
        Ok(())
    }
}

/// Validate the configuration
pub fn validate_config(config: &Config) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::valid();

    result = validate_search_api_config(config, result);
    result = validate_cache_config(config, result);
    result = validate_storage_config(config, result);

    result
}

fn validate_search_api_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let has_key = config
        .search_api
        .api_key
        .as_ref()
        .is_some_and(|k| !k.expose_secret().is_empty());

    if !has_key {
        result = result.with_error(
            ValidationIssue::new("search_api.api_key", "No search API key configured")
                .with_suggestion("Set RAPIDAPI_KEY environment variable or search_api.api_key in config"),
        );
    }

    if config.search_api.timeout_secs == 0 {
        result = result.with_error(ValidationIssue::new(
            "search_api.timeout_secs",
            "Timeout must be greater than zero",
        ));
    }

    result
}

fn validate_cache_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    let cache = &config.cache;

    if cache.fresh_hours <= 0 || cache.empty_hours <= 0 {
        result = result.with_error(ValidationIssue::new(
            "cache",
            "fresh_hours and empty_hours must be positive",
        ));
    } else if cache.empty_hours > cache.fresh_hours {
        result = result.with_warning(
            ValidationIssue::new(
                "cache.empty_hours",
                "Empty results are kept longer than non-empty results",
            )
            .with_suggestion("Lower cache.empty_hours so empty searches are retried sooner"),
        );
    }

    if cache.upstream_max_results == 0 || cache.upstream_max_results > UPSTREAM_MAX_RESULTS {
        result = result.with_error(ValidationIssue::new(
            "cache.upstream_max_results",
            format!("Must be between 1 and {}", UPSTREAM_MAX_RESULTS),
        ));
    }

    result
}

fn validate_storage_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    match config.storage.backend {
        StorageBackendType::Postgres if config.storage.postgres.is_none() => {
            result = result.with_error(
                ValidationIssue::new(
                    "storage.postgres",
                    "PostgreSQL backend selected but not configured",
                )
                .with_suggestion("Set DATABASE_URL environment variable or configure storage.postgres"),
            );
        }
        StorageBackendType::Memory => {
            result = result.with_warning(ValidationIssue::new(
                "storage.backend",
                "In-process cache is not shared between instances and is lost on restart",
            ));
        }
        _ => {}
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PostgresConfig;
    use secrecy::SecretString;

    fn configured() -> Config {
        let mut config = Config::default();
        config.search_api.api_key = Some(SecretString::from("key".to_string()));
        config
    }

    #[test]
    fn test_validate_default_config() {
        let result = validate_config(&Config::default());

        // Missing API key is the only hard error
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path, "search_api.api_key");
        assert!(result.warnings.iter().any(|w| w.path == "storage.backend"));
    }

    #[test]
    fn test_validate_configured() {
        let mut config = configured();
        config.storage.backend = StorageBackendType::Postgres;
        config.storage.postgres = Some(PostgresConfig::new("postgres://localhost/trendfeed"));

        let result = validate_config(&config);
        assert!(result.valid);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_validate_cache_bounds() {
        let mut config = configured();
        config.cache.upstream_max_results = 50;
        assert!(!validate_config(&config).valid);

        let mut config = configured();
        config.cache.fresh_hours = 0;
        assert!(!validate_config(&config).valid);

        let mut config = configured();
        config.cache.empty_hours = 48;
        let result = validate_config(&config);
        assert!(result.valid);
        assert!(result.warnings.iter().any(|w| w.path == "cache.empty_hours"));
    }

    #[test]
    fn test_validate_postgres_missing() {
        let mut config = configured();
        config.storage.backend = StorageBackendType::Postgres;
        let result = validate_config(&config);
        assert!(result.errors.iter().any(|e| e.path == "storage.postgres"));
    }
}
