//! # Device Connection Manager
//!
//! [`Printer`] owns the one live handle to the physical printer and
//! serializes every device operation behind a single mutex.
//!
//! ## Connection Lifecycle
//!
//! ```text
//!   (no handle) --first op--> connect loop --ok--> live handle
//!        ^                        |  ^                 |
//!        |                        |  +--sleep, retry---+ (open failed)
//!        +--- write fault / mark_disconnected ---------+
//! ```
//!
//! - Nothing is opened until the first print, so the process starts fine
//!   with the printer switched off.
//! - A failed open sleeps `reconnect_interval` and tries again, forever
//!   unless `max_reconnect_attempts` is set. The lock stays held the whole
//!   time: the printer cannot serve two jobs anyway, so other callers simply
//!   queue behind it.
//! - A failed write drops the handle and returns the error. The next call
//!   reconnects from scratch.
//!
//! ## Lock-Free Status
//!
//! [`Printer::is_connected`] reads an atomic flag instead of the mutex, so a
//! status page stays responsive while another thread is stuck reconnecting.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use tracing::{info, instrument, warn};

use super::config::PrinterConfig;
use super::format::format_text;
use crate::error::{Result, TyperError};
use crate::protocol::{codepage, commands};
use crate::transport::{Connector, Transport};

/// Thread-safe connection manager for one receipt printer.
///
/// Share it with `Arc<Printer>`; every method takes `&self`.
///
/// ```
/// use thermal_typer::printer::{Printer, PrinterConfig};
/// use thermal_typer::transport::MemoryConnector;
///
/// let memory = MemoryConnector::new();
/// let printer = Printer::new(PrinterConfig::default(), memory.clone());
///
/// assert!(!printer.is_connected());
/// printer.print_text("Hello world", false)?;
/// printer.cut(None)?;
/// assert!(printer.is_connected());
/// assert_eq!(memory.writes().len(), 2);
/// # Ok::<(), thermal_typer::TyperError>(())
/// ```
pub struct Printer {
    config: PrinterConfig,
    connector: Arc<dyn Connector>,
    device: Mutex<Option<LiveDevice>>,
    /// Mirrors `device.is_some()`; cleared by `mark_disconnected` from outside the lock.
    connected: AtomicBool,
    /// Bumped by every `mark_disconnected`. A handle opened under an older
    /// generation is never written to again.
    generation: AtomicU64,
}

struct LiveDevice {
    transport: Box<dyn Transport>,
    generation: u64,
}

impl Printer {
    /// Create a manager. Does not touch the device.
    pub fn new(config: PrinterConfig, connector: impl Connector + 'static) -> Self {
        Self::with_connector(config, Arc::new(connector))
    }

    /// Create a manager over an already shared connector.
    pub fn with_connector(config: PrinterConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            device: Mutex::new(None),
            connected: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &PrinterConfig {
        &self.config
    }

    /// Print text.
    ///
    /// Word-wrapped to `chars_per_line` unless `raw`, in which case spacing is
    /// kept and only a trailing newline is ensured. The left margin is
    /// re-asserted at the start of every job.
    pub fn print_text(&self, text: &str, raw: bool) -> Result<()> {
        let body = format_text(text, self.config.chars_per_line, raw);

        let mut job = commands::set_left_margin(self.config.margin_units);
        job.extend(codepage::encode(&body));

        self.with_device(|device| device.write_all(&job))
    }

    /// Print a single character immediately (live typing).
    ///
    /// `\n` feeds a line. Other non-printable characters (controls,
    /// separators other than the plain space, invisible format characters)
    /// are ignored without touching the device.
    pub fn print_char(&self, ch: char) -> Result<()> {
        let byte = match ch {
            '\n' => commands::LF,
            c if !is_printable(c) => return Ok(()),
            c => codepage::encode_char(c).unwrap_or(b'?'),
        };

        self.with_device(|device| device.write_all(&[byte]))
    }

    /// Feed `lines` blank lines (default: `bottom_margin_lines`), then cut.
    pub fn cut(&self, lines: Option<u32>) -> Result<()> {
        let lines = lines.unwrap_or(self.config.bottom_margin_lines);

        let mut job = commands::feed_lines(lines);
        job.extend(commands::cut());

        self.with_device(|device| device.write_all(&job))
    }

    /// True while a live handle exists. Never blocks and never connects.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Force the next operation to reconnect.
    ///
    /// For callers that noticed a fault through some other path. Does not
    /// wait for the lock; the stale handle is dropped by the next operation.
    pub fn mark_disconnected(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if self.connected.swap(false, Ordering::AcqRel) {
            info!("Printer marked disconnected");
        }
    }

    /// Run `op` against a live device while holding the lock.
    fn with_device<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Transport) -> Result<()>,
    {
        let mut slot = self.lock_device();

        let current = self.generation.load(Ordering::Acquire);
        if slot.as_ref().is_some_and(|live| live.generation != current) {
            info!("Dropping handle marked disconnected");
            *slot = None;
        }

        let live = match slot.take() {
            Some(live) => live,
            None => {
                let transport = self.connect()?;
                self.connected.store(true, Ordering::Release);
                // A mark that landed while connecting applies to this handle too
                if self.generation.load(Ordering::Acquire) != current {
                    self.connected.store(false, Ordering::Release);
                }
                LiveDevice {
                    transport,
                    generation: current,
                }
            }
        };
        let live = slot.insert(live);

        if let Err(e) = op(live.transport.as_mut()) {
            warn!(error = %e, "Printer fault, dropping connection");
            *slot = None;
            self.connected.store(false, Ordering::Release);
            return Err(e);
        }

        Ok(())
    }

    /// Open the device, retrying until it answers (or the cap is hit).
    ///
    /// Must be called with the device lock held.
    #[instrument(skip(self), fields(vid = self.config.vendor_id, pid = self.config.product_id))]
    fn connect(&self) -> Result<Box<dyn Transport>> {
        let interval = self.config.reconnect_interval();
        let mut attempts: u32 = 0;

        loop {
            match self
                .connector
                .open(self.config.vendor_id, self.config.product_id)
            {
                Ok(device) => {
                    info!("Printer connected after {} attempt(s)", attempts + 1);
                    return Ok(device);
                }
                Err(e) => {
                    attempts += 1;

                    if let Some(max) = self.config.max_reconnect_attempts {
                        if attempts >= max {
                            warn!(error = %e, attempts, "Giving up on printer");
                            return Err(TyperError::ReconnectExhausted {
                                attempts,
                                last_error: e.to_string(),
                            });
                        }
                    }

                    warn!(
                        error = %e,
                        attempts,
                        "Printer not reachable, retrying in {}s",
                        interval.as_secs()
                    );
                    thread::sleep(interval);
                }
            }
        }
    }

    fn lock_device(&self) -> MutexGuard<'_, Option<LiveDevice>> {
        // A panic mid-write leaves at worst a stale handle, which the next fault replaces
        self.device.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    let format_char = matches!(
        ch,
        '\u{00AD}'
            | '\u{061C}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
    );
    !(ch.is_control() || ch.is_whitespace() || format_char)
}

impl std::fmt::Debug for Printer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Printer")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
