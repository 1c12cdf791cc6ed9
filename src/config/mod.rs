//! Application configuration
//!
//! Loaded from a JSON file. Every field has a default, so a missing file or
//! a partial file is valid:
//!
//! ```json
//! {
//!   "server":   { "host": "0.0.0.0", "port": 5000, "cors_origins": [] },
//!   "database": { "url": "sqlite://openmusic.db?mode=rwc", "max_connections": 5 },
//!   "logging":  { "filter": "info", "format": "json" }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Outcome of reading the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file on disk
    File,
    /// File was absent; defaults used
    Defaults,
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = Self::from_json(&content).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })?;

        Ok((config, ConfigSource::File))
    }

    /// Parse configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Bind address and CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to listen on (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed browser origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as passed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Connection pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL (default: "sqlite://openmusic.db?mode=rwc")
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Upper bound on pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free connection before failing (default: 30)
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_database_url() -> String {
    "sqlite://openmusic.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable records with span context
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_log_filter")]
    pub filter: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            format: LogFormat::default(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config file '{path}': {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
