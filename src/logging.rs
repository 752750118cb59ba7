//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured filter. Output goes to stderr so
/// command output on stdout stays machine-readable.
pub fn init(service_name: &str, config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_target(false)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init(),
    }

    tracing::debug!(service = service_name, format = ?config.format, "logging initialized");
}
