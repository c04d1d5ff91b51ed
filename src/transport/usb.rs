//! # USB Printer Class Transport
//!
//! Talks to the printer through the kernel `usblp` driver, which exposes
//! every USB printer-class device as a character device (`/dev/usb/lp0`,
//! `/dev/usb/lp1`, ...). Writing to that node sends bytes straight to the
//! printer's bulk OUT endpoint, so no user-space USB stack is needed.
//!
//! ## Device Lookup
//!
//! The lp node does not carry vendor/product IDs in its name. The matching
//! node is found through sysfs:
//!
//! ```text
//! /sys/class/usbmisc/lp0/device          -> .../1-1.2:1.0   (USB interface)
//! /sys/class/usbmisc/lp0/device/../idVendor   "04b8"
//! /sys/class/usbmisc/lp0/device/../idProduct  "0202"
//! ```
//!
//! ## Permissions
//!
//! `/dev/usb/lp*` is usually owned by group `lp`:
//!
//! ```bash
//! $ sudo usermod -aG lp $USER
//! ```
//!
//! ## Chunked Writes
//!
//! Large data blocks are written in chunks so a long raw job does not sit in
//! one giant kernel write while the printer is still feeding.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Connector, Transport};
use crate::error::{Result, TyperError};

/// Default sysfs class directory for USB printer-class nodes
pub const DEFAULT_SYSFS_CLASS: &str = "/sys/class/usbmisc";

/// Default directory holding the `lpN` character devices
pub const DEFAULT_DEV_DIR: &str = "/dev/usb";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Finds and opens USB receipt printers by vendor/product ID.
#[derive(Debug, Clone)]
pub struct UsbConnector {
    sysfs_class: PathBuf,
    dev_dir: PathBuf,
}

impl UsbConnector {
    /// Connector over the standard Linux locations.
    pub fn new() -> Self {
        Self::with_roots(DEFAULT_SYSFS_CLASS, DEFAULT_DEV_DIR)
    }

    /// Connector over custom roots (used by tests with a fake sysfs tree).
    pub fn with_roots(sysfs_class: impl Into<PathBuf>, dev_dir: impl Into<PathBuf>) -> Self {
        Self {
            sysfs_class: sysfs_class.into(),
            dev_dir: dev_dir.into(),
        }
    }

    /// Path of the lp node whose USB IDs match, if one is plugged in.
    pub fn find_device(&self, vendor_id: u16, product_id: u16) -> Result<Option<PathBuf>> {
        let entries = match fs::read_dir(&self.sysfs_class) {
            Ok(entries) => entries,
            // No usblp module loaded means no printer either
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("lp"))
            .collect();
        names.sort();

        for name in names {
            let usb_device = self.sysfs_class.join(&name).join("device").join("..");
            let ids = (
                read_usb_id(&usb_device.join("idVendor")),
                read_usb_id(&usb_device.join("idProduct")),
            );
            if let (Some(vid), Some(pid)) = ids {
                debug!(node = %name, "usblp node {:04x}:{:04x}", vid, pid);
                if vid == vendor_id && pid == product_id {
                    return Ok(Some(self.dev_dir.join(&name)));
                }
            }
        }

        Ok(None)
    }
}

impl Default for UsbConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector for UsbConnector {
    fn open(&self, vendor_id: u16, product_id: u16) -> Result<Box<dyn Transport>> {
        let path = self
            .find_device(vendor_id, product_id)
            .map_err(|e| TyperError::ConnectionUnavailable(e.to_string()))?
            .ok_or_else(|| {
                TyperError::ConnectionUnavailable(format!(
                    "no USB printer {:04x}:{:04x} found",
                    vendor_id, product_id
                ))
            })?;

        Ok(Box::new(UsbTransport::open(&path)?))
    }
}

/// An open `/dev/usb/lpN` node.
pub struct UsbTransport {
    file: File,
}

impl UsbTransport {
    /// Open the character device for writing.
    ///
    /// ## Errors
    ///
    /// [`TyperError::ConnectionUnavailable`] if the node is missing or the
    /// user lacks permission (not in group `lp`).
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            TyperError::ConnectionUnavailable(format!("Failed to open {}: {}", path.display(), e))
        })?;

        Ok(Self { file })
    }
}

impl Transport for UsbTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        for chunk in data.chunks(CHUNK_SIZE) {
            self.file
                .write_all(chunk)
                .map_err(|e| TyperError::DeviceIo(format!("Write failed: {}", e)))?;
        }

        self.file
            .flush()
            .map_err(|e| TyperError::DeviceIo(format!("Flush failed: {}", e)))
    }
}

/// Parse a sysfs USB ID file (four hex digits plus newline).
fn read_usb_id(path: &Path) -> Option<u16> {
    let contents = fs::read_to_string(path).ok()?;
    parse_usb_id(&contents)
}

fn parse_usb_id(contents: &str) -> Option<u16> {
    u16::from_str_radix(contents.trim(), 16).ok()
}

// ============================================================================
// TESTS
// ============================================================================
