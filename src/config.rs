//! # Application Configuration
//!
//! Everything is read from one TOML file (default `config.toml`):
//!
//! ```toml
//! [printer]
//! vendor_id = 0x04b8
//! product_id = 0x0202
//! chars_per_line = 37
//! margin_units = 60
//! bottom_margin_lines = 4
//! reconnect_interval = 3
//! # max_reconnect_attempts = 10
//!
//! [web]
//! host = "0.0.0.0"
//! port = 5000
//!
//! [logging]
//! level = "info"
//!
//! [shortcuts]
//! wifi = "WiFi: my-network\nPass: super-secret"
//! ```
//!
//! Every field has a default, so a partial file (or none at all) works.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::printer::PrinterConfig;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub printer: PrinterConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
    /// Extra literal shortcuts, keyword → text.
    pub shortcuts: BTreeMap<String, String>,
}

/// Local web page settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl WebConfig {
    /// `host:port` for binding.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.printer.validate()?;
        Ok(config)
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Like [`AppConfig::load`], but a missing file yields the defaults.
    ///
    /// Returns whether the file existed alongside the config so the caller
    /// can log it once logging is up.
    pub fn load_or_default(path: &Path) -> Result<(Self, bool), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.web.listen_addr(), "0.0.0.0:5000");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_file() {
        let config = AppConfig::from_toml(
            r#"
            [printer]
            vendor_id = 0x04b8
            product_id = 0x0e15
            chars_per_line = 42
            margin_units = 0
            bottom_margin_lines = 6
            reconnect_interval = 5
            max_reconnect_attempts = 10

            [web]
            host = "127.0.0.1"
            port = 8080

            [logging]
            level = "debug"

            [shortcuts]
            wifi = "WiFi: my-network\nPass: super-secret"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.printer,
            PrinterConfig {
                vendor_id: 0x04b8,
                product_id: 0x0e15,
                chars_per_line: 42,
                margin_units: 0,
                bottom_margin_lines: 6,
                reconnect_interval_secs: 5,
                max_reconnect_attempts: Some(10),
            }
        );
        assert_eq!(config.web.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.shortcuts.get("wifi").map(String::as_str),
            Some("WiFi: my-network\nPass: super-secret")
        );
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let err = AppConfig::from_toml("[printer]\nchars_per_line = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = AppConfig::from_toml("[printer\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "[web]\nport = 9000\n").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.web.port, 9000);
        assert_eq!(config.printer, PrinterConfig::default());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Io { .. })));

        let (config, found) = AppConfig::load_or_default(&path).unwrap();
        assert!(!found);
        assert_eq!(config, AppConfig::default());
    }
}
