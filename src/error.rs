//! # Error Types
//!
//! This module defines error types used throughout the thermal-typer library.
//!
//! Two device failures are distinguished:
//!
//! - [`TyperError::ConnectionUnavailable`] is what a connector reports when
//!   the printer cannot be opened. The connection manager swallows it and
//!   retries, so callers only ever see it as latency.
//! - [`TyperError::DeviceIo`] is a write that failed on a handle that was
//!   live. It always reaches the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for thermal-typer operations
#[derive(Debug, Error)]
pub enum TyperError {
    /// The printer could not be opened (powered off, unplugged, no permission)
    #[error("Printer unavailable: {0}")]
    ConnectionUnavailable(String),

    /// The configured reconnect cap was reached without opening the printer
    #[error("Printer unavailable after {attempts} attempt(s): {last_error}")]
    ReconnectExhausted { attempts: u32, last_error: String },

    /// A write failed on a previously live device handle
    #[error("Device I/O error: {0}")]
    DeviceIo(String),

    /// Configuration loading or validation failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed fine but is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, TyperError>;
