//! Read-only endpoints. Neither touches the printer lock.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::super::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub connected: bool,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ShortcutsResponse {
    pub shortcuts: Vec<String>,
}

/// GET /status - printer connection state.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        connected: state.dispatcher.printer().is_connected(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}

/// GET /shortcuts - sorted shortcut keywords.
pub async fn shortcuts(State(state): State<Arc<AppState>>) -> Json<ShortcutsResponse> {
    let shortcuts = state
        .dispatcher
        .registry()
        .list_shortcuts()
        .into_iter()
        .map(str::to_string)
        .collect();
    Json(ShortcutsResponse { shortcuts })
}
