//! Logging setup
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured filter when set.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Logging initialisation failures
#[derive(Debug, thiserror::Error)]
pub enum ObservabilityError {
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("Failed to install log subscriber: {0}")]
    Install(String),
}

/// Build the filter from `RUST_LOG`, or from `config.filter` when unset
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ObservabilityError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.filter).map_err(|e| ObservabilityError::InvalidFilter {
        filter: config.filter.clone(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), ObservabilityError> {
    let filter = build_filter(config)?;

    let result = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .try_init(),
    };

    result.map_err(|e| ObservabilityError::Install(e.to_string()))
}
