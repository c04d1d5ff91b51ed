//! # ESC/POS Protocol Implementation
//!
//! Low-level byte builders for the receipt printer.
//!
//! ## Module Structure
//!
//! - [`commands`]: Margin, feed and cut commands
//! - [`codepage`]: PC437 text encoding
//!
//! ## Usage Example
//!
//! ```
//! use thermal_typer::protocol::{codepage, commands};
//!
//! let mut data = Vec::new();
//! data.extend(commands::set_left_margin(60));
//! data.extend(codepage::encode("Hello\n"));
//! data.extend(commands::feed_lines(4));
//! data.extend(commands::cut());
//!
//! // Send `data` to printer via transport...
//! ```

pub mod codepage;
pub mod commands;
