//! Server state shared across handlers.

use std::time::Instant;

use crate::dispatch::Dispatcher;

/// Application state shared across handlers.
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// When the server came up, for the uptime shown on `/status`.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            started_at: Instant::now(),
        }
    }
}
