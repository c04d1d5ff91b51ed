//! # Printer Module
//!
//! Everything between "some text" and "bytes on the wire".
//!
//! ## Modules
//!
//! - [`config`]: Printer identity and page layout
//! - [`format`]: Word wrapping
//! - [`connection`]: The thread-safe connection manager

pub mod config;
pub mod connection;
pub mod format;

pub use config::PrinterConfig;
pub use connection::Printer;
