//! # Thermal Typer - Typewriter for Receipt Printers
//!
//! Turns text typed in a terminal or on a local web page into paper from a
//! USB ESC/POS receipt printer. It provides:
//!
//! - **Connection manager**: lazy connect, automatic reconnect, one job at a time
//! - **Text formatting**: word wrap to the paper's column width, or raw layout
//! - **Shortcuts**: keywords that print canned, annotated or computed text
//! - **Dispatcher**: one parser shared by every front-end
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use thermal_typer::{
//!     dispatch::Dispatcher,
//!     printer::{Printer, PrinterConfig},
//!     shortcuts::{ShortcutRegistry, SystemClock},
//!     transport::UsbConnector,
//! };
//!
//! let printer = Arc::new(Printer::new(PrinterConfig::TM_T88V, UsbConnector::new()));
//! let registry = Arc::new(ShortcutRegistry::builtin(Arc::new(SystemClock)));
//! let dispatcher = Dispatcher::new(printer, registry);
//!
//! let result = dispatcher.dispatch("Hello from the terminal");
//! println!("{}", result.message);
//!
//! dispatcher.dispatch("!time");
//! dispatcher.dispatch("cut");
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`dispatch`] | Command parsing shared by all front-ends |
//! | [`shortcuts`] | Keyword registry |
//! | [`printer`] | Connection manager, formatter, printer config |
//! | [`protocol`] | ESC/POS command builders |
//! | [`transport`] | Communication backends |
//! | [`server`] | Local web page |
//! | [`cli`] | Terminal line mode |
//! | [`config`] | `config.toml` loading |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! Developed against an Epson TM-T88V (USB `04b8:0202`). Any printer that
//! speaks ESC/POS and binds to the Linux `usblp` driver should work with
//! its own vendor/product IDs.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod server;
pub mod shortcuts;
pub mod transport;

// Re-exports for convenience
pub use dispatch::{DispatchResult, Dispatcher};
pub use error::{Result, TyperError};
pub use printer::{Printer, PrinterConfig};
