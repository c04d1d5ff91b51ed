//! # Printer Transport Layer
//!
//! This module provides communication backends for sending data to printers.
//!
//! A [`Connector`] knows how to find and open the printer; the
//! [`Transport`] it returns is the live handle bytes are written to. The
//! connection manager in [`crate::printer`] owns exactly one transport at a
//! time and asks the connector for a fresh one after a fault.
//!
//! ## Available Transports
//!
//! - [`usb`]: USB printer class device (`/dev/usb/lpN`, Linux)
//! - [`memory`]: In-memory recorder for tests and dry runs

pub mod memory;
pub mod usb;

pub use memory::MemoryConnector;
pub use usb::UsbConnector;

use crate::error::Result;

/// A live, writable channel to the printer.
pub trait Transport: Send {
    /// Write the whole buffer. Any failure means the handle is no longer
    /// trustworthy and must be dropped.
    fn write_all(&mut self, data: &[u8]) -> Result<()>;
}

/// Opens transports for a `(vendor_id, product_id)` pair.
pub trait Connector: Send + Sync {
    /// Try once to open the device.
    ///
    /// Returns [`crate::TyperError::ConnectionUnavailable`] when the device
    /// is absent or cannot be opened right now.
    fn open(&self, vendor_id: u16, product_id: u16) -> Result<Box<dyn Transport>>;
}
