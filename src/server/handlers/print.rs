//! Printing handlers.
//!
//! Both endpoints may block for as long as the printer is unreachable, so
//! the device work runs on the blocking thread pool.
//!
//! Bodies are parsed as JSON whatever their `Content-Type`, so a bare
//! `fetch` or `curl -d` works without setting headers.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use std::sync::Arc;

use super::super::state::AppState;

/// Body for POST /print.
#[derive(Debug, Deserialize)]
pub struct PrintRequest {
    #[serde(default)]
    pub text: String,
}

/// Body for POST /char.
#[derive(Debug, Deserialize)]
pub struct CharRequest {
    #[serde(default, rename = "char")]
    pub ch: String,
}

/// Handle POST /print - run the text through the dispatcher.
pub async fn print(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let req: PrintRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let dispatcher = state.dispatcher.clone();
    let result = tokio::task::spawn_blocking(move || dispatcher.dispatch(&req.text)).await;

    match result {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(&format!("Task error: {}", e)),
    }
}

/// Handle POST /char - print one keystroke (live typing).
///
/// Only the first character of `char` is used; an empty value is a no-op.
pub async fn print_char(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let req: CharRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(response) => return response,
    };
    let Some(ch) = req.ch.chars().next() else {
        return Json(json!({ "ok": true })).into_response();
    };

    let printer = Arc::clone(state.dispatcher.printer());
    let result = tokio::task::spawn_blocking(move || printer.print_char(ch)).await;

    match result {
        Ok(Ok(())) => Json(json!({ "ok": true })).into_response(),
        Ok(Err(e)) => Json(json!({ "error": true, "message": e.to_string() })).into_response(),
        Err(e) => error_response(&format!("Task error: {}", e)),
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": true, "message": format!("Invalid JSON: {}", e) })),
        )
            .into_response()
    })
}

fn error_response(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": true, "message": message })),
    )
        .into_response()
}
