//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits non-zero.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::observability::ObservabilityError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Logging could not be initialised
    LoggingError,
    /// Database could not be opened or prepared
    DatabaseError,
    /// Runtime or server failure
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "OPENMUSIC_CLI_CONFIG_ERROR",
            Self::LoggingError => "OPENMUSIC_CLI_LOGGING_ERROR",
            Self::DatabaseError => "OPENMUSIC_CLI_DATABASE_ERROR",
            Self::BootFailed => "OPENMUSIC_CLI_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn logging_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::LoggingError, msg)
    }

    pub fn database_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DatabaseError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<ObservabilityError> for CliError {
    fn from(e: ObservabilityError) -> Self {
        Self::logging_error(e.to_string())
    }
}

impl From<sqlx::Error> for CliError {
    fn from(e: sqlx::Error) -> Self {
        Self::database_error(e.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::boot_failed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
