//! # Printer Configuration
//!
//! Hardware identity and page layout for the receipt printer.
//!
//! ## Usage
//!
//! ```
//! use thermal_typer::printer::PrinterConfig;
//!
//! let config = PrinterConfig::TM_T88V;
//! assert_eq!(config.chars_per_line, 37);
//! assert_eq!(config.reconnect_interval().as_secs(), 3);
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Column width used when none is configured
pub const DEFAULT_CHARS_PER_LINE: usize = 37;

/// # Printer Configuration
///
/// Immutable once built; the connection manager keeps its own copy and
/// front-ends read it through [`crate::printer::Printer::config`].
///
/// ## Fields
///
/// - **vendor_id / product_id**: USB IDs used to find the device
/// - **chars_per_line**: wrap width for non-raw text (must be > 0)
/// - **margin_units**: hardware left margin, re-sent before every text job
/// - **bottom_margin_lines**: blank lines fed before a cut
/// - **reconnect_interval_secs**: pause between failed open attempts
/// - **max_reconnect_attempts**: `None` retries forever
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrinterConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    pub chars_per_line: usize,
    pub margin_units: u16,
    pub bottom_margin_lines: u32,
    #[serde(rename = "reconnect_interval")]
    pub reconnect_interval_secs: u64,
    pub max_reconnect_attempts: Option<u32>,
}

impl PrinterConfig {
    /// # Epson TM-T88V
    ///
    /// 80mm paper, USB ID `04b8:0202`. With a 60 unit left margin the
    /// standard 12x24 font fits 37 columns comfortably.
    pub const TM_T88V: Self = Self {
        vendor_id: 0x04b8,
        product_id: 0x0202,
        chars_per_line: DEFAULT_CHARS_PER_LINE,
        margin_units: 60,
        bottom_margin_lines: 4,
        reconnect_interval_secs: 3,
        max_reconnect_attempts: None,
    };

    /// Pause between failed connection attempts.
    #[inline]
    pub fn reconnect_interval(&self) -> Duration {
        Duration::from_secs(self.reconnect_interval_secs)
    }

    /// Reject values the formatter cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chars_per_line == 0 {
            return Err(ConfigError::Invalid(
                "printer.chars_per_line must be greater than 0".to_string(),
            ));
        }
        if self.max_reconnect_attempts == Some(0) {
            return Err(ConfigError::Invalid(
                "printer.max_reconnect_attempts must be at least 1 (omit it to retry forever)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::TM_T88V
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tm_t88v() {
        assert_eq!(PrinterConfig::default(), PrinterConfig::TM_T88V);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: PrinterConfig = toml::from_str(
            r#"
            vendor_id = 0x0416
            product_id = 0x5011
            reconnect_interval = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.vendor_id, 0x0416);
        assert_eq!(config.product_id, 0x5011);
        assert_eq!(config.reconnect_interval(), Duration::from_secs(10));
        assert_eq!(config.chars_per_line, DEFAULT_CHARS_PER_LINE);
        assert_eq!(config.bottom_margin_lines, 4);
        assert_eq!(config.max_reconnect_attempts, None);
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = PrinterConfig {
            chars_per_line: 0,
            ..PrinterConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_attempt_cap_rejected() {
        let config = PrinterConfig {
            max_reconnect_attempts: Some(0),
            ..PrinterConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PrinterConfig {
            max_reconnect_attempts: Some(3),
            ..PrinterConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
