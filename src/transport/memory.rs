//! # In-Memory Transport
//!
//! A [`Connector`] that never touches hardware. Every write is recorded and
//! can be inspected afterwards, which makes it the transport of choice for
//! tests. Failures and slow devices can be simulated:
//!
//! ```
//! use std::time::Duration;
//! use thermal_typer::transport::{Connector, MemoryConnector, Transport};
//!
//! let memory = MemoryConnector::new();
//! memory.fail_next_opens(2);
//! memory.set_write_delay(Duration::from_millis(5));
//!
//! assert!(memory.open(0x04b8, 0x0202).is_err());
//! assert!(memory.open(0x04b8, 0x0202).is_err());
//! let mut device = memory.open(0x04b8, 0x0202).unwrap();
//! device.write_all(b"hi\n").unwrap();
//!
//! assert_eq!(memory.open_attempts(), 3);
//! assert_eq!(memory.writes(), vec![b"hi\n".to_vec()]);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use super::{Connector, Transport};
use crate::error::{Result, TyperError};

#[derive(Debug, Default)]
struct State {
    writes: Vec<Vec<u8>>,
    open_attempts: u32,
    opened: u32,
    fail_opens: u32,
    fail_writes: u32,
    write_delay: Duration,
    in_flight: u32,
    max_in_flight: u32,
}

/// Shared recorder; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    state: Arc<Mutex<State>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next `n` calls to `open` fail as if the printer were off.
    pub fn fail_next_opens(&self, n: u32) {
        self.state().fail_opens = n;
    }

    /// Make the next `n` writes fail as if the cable were pulled.
    pub fn fail_next_writes(&self, n: u32) {
        self.state().fail_writes = n;
    }

    /// Sleep this long inside every write, to widen race windows.
    pub fn set_write_delay(&self, delay: Duration) {
        self.state().write_delay = delay;
    }

    /// Every successful write, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state().writes.clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.state().writes.len()
    }

    /// All successful writes joined together, as the paper would see them.
    pub fn output(&self) -> Vec<u8> {
        self.state().writes.concat()
    }

    /// Number of times `open` was called, successful or not.
    pub fn open_attempts(&self) -> u32 {
        self.state().open_attempts
    }

    /// Number of handles handed out.
    pub fn opened(&self) -> u32 {
        self.state().opened
    }

    /// Highest number of writes that were ever running at the same time.
    pub fn max_concurrent_writes(&self) -> u32 {
        self.state().max_in_flight
    }
}

impl Connector for MemoryConnector {
    fn open(&self, vendor_id: u16, product_id: u16) -> Result<Box<dyn Transport>> {
        let mut state = self.state();
        state.open_attempts += 1;
        if state.fail_opens > 0 {
            state.fail_opens -= 1;
            return Err(TyperError::ConnectionUnavailable(format!(
                "memory printer {:04x}:{:04x} is switched off",
                vendor_id, product_id
            )));
        }
        state.opened += 1;

        Ok(Box::new(MemoryTransport {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MemoryTransport {
    state: Arc<Mutex<State>>,
}

impl MemoryTransport {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MemoryTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        let delay = {
            let mut state = self.state();
            if state.fail_writes > 0 {
                state.fail_writes -= 1;
                return Err(TyperError::DeviceIo("memory printer unplugged".to_string()));
            }
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.write_delay
        };

        if !delay.is_zero() {
            thread::sleep(delay);
        }

        let mut state = self.state();
        state.writes.push(data.to_vec());
        state.in_flight -= 1;
        Ok(())
    }
}
