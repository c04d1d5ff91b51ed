//! # HTTP Server for Typewriter Printing
//!
//! A single-page web UI and a small JSON API over the shared dispatcher.
//!
//! ## Routes
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET  | `/`          | the typewriter page |
//! | GET  | `/status`    | `{"connected": bool, "uptime_secs": n}` |
//! | GET  | `/shortcuts` | `{"shortcuts": [...]}` |
//! | POST | `/print`     | `{"text": ".."}` → dispatch result |
//! | POST | `/char`      | `{"char": "x"}` → print one character |
//!
//! ## Usage
//!
//! ```bash
//! thermal-typer serve --config config.toml
//! ```
//!
//! Then open http://localhost:5000 in a browser.

mod handlers;
mod state;
mod static_files;

pub use state::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::WebConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;

/// Build the router. Split out from [`serve`] so tests can drive it directly.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(static_files::index_handler))
        .route("/status", get(handlers::status::status))
        .route("/shortcuts", get(handlers::status::shortcuts))
        .route("/print", post(handlers::print::print))
        .route("/char", post(handlers::print::print_char))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and run until it fails.
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use thermal_typer::{config::WebConfig, server, Dispatcher, Printer, PrinterConfig};
/// use thermal_typer::shortcuts::{ShortcutRegistry, SystemClock};
/// use thermal_typer::transport::UsbConnector;
///
/// # async fn example() -> Result<(), thermal_typer::TyperError> {
/// let printer = Arc::new(Printer::new(PrinterConfig::default(), UsbConnector::new()));
/// let registry = Arc::new(ShortcutRegistry::builtin(Arc::new(SystemClock)));
///
/// server::serve(WebConfig::default(), Dispatcher::new(printer, registry)).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: WebConfig, dispatcher: Dispatcher) -> Result<()> {
    let listen_addr = config.listen_addr();
    let app = router(Arc::new(AppState::new(dispatcher)));

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!("Web UI listening on http://{}/", listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::{Printer, PrinterConfig};
    use crate::shortcuts::{ShortcutRegistry, SystemClock};
    use crate::transport::MemoryConnector;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app_with(config: PrinterConfig) -> (Router, MemoryConnector) {
        let memory = MemoryConnector::new();
        let printer = Arc::new(Printer::new(config, memory.clone()));
        let registry = Arc::new(ShortcutRegistry::builtin(Arc::new(SystemClock)));
        let state = Arc::new(AppState::new(Dispatcher::new(printer, registry)));
        (router(state), memory)
    }

    fn app() -> (Router, MemoryConnector) {
        app_with(PrinterConfig {
            reconnect_interval_secs: 0,
            ..PrinterConfig::default()
        })
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let (app, _) = app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Thermal Typewriter"));
    }

    #[tokio::test]
    async fn test_status_reports_connection() {
        let (app, _) = app();
        let (status, body) = send(app.clone(), "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["connected"], json!(false));

        send(app.clone(), "POST", "/print", Some(json!({ "text": "hi" }))).await;
        let (_, body) = send(app, "GET", "/status", None).await;
        assert_eq!(body["connected"], json!(true));
    }

    #[tokio::test]
    async fn test_shortcuts_sorted() {
        let (app, _) = app();
        let (_, body) = send(app, "GET", "/shortcuts", None).await;
        let names: Vec<&str> = body["shortcuts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();

        assert!(names.contains(&"time"));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn test_print_returns_dispatch_result() {
        let (app, memory) = app();
        let (status, body) = send(app, "POST", "/print", Some(json!({ "text": "hello" }))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "printed": true, "message": "Printed.", "error": false, "isExit": false })
        );
        assert!(memory.output().ends_with(b"hello\n"));
    }

    #[tokio::test]
    async fn test_print_exit_sets_flag() {
        let (app, memory) = app();
        let (_, body) = send(app, "POST", "/print", Some(json!({ "text": "quit" }))).await;

        assert_eq!(body["isExit"], json!(true));
        assert_eq!(memory.open_attempts(), 0);
    }

    #[tokio::test]
    async fn test_print_missing_text_is_blank_line() {
        let (app, memory) = app();
        let (_, body) = send(app, "POST", "/print", Some(json!({}))).await;

        assert_eq!(body["message"], json!("(blank line printed)"));
        assert!(memory.output().ends_with(b"\n"));
    }

    #[tokio::test]
    async fn test_char_prints_first_character() {
        let (app, memory) = app();
        let (_, body) = send(app, "POST", "/char", Some(json!({ "char": "xy" }))).await;

        assert_eq!(body, json!({ "ok": true }));
        assert_eq!(memory.output(), b"x".to_vec());
    }

    #[tokio::test]
    async fn test_empty_char_is_noop() {
        let (app, memory) = app();
        let (_, body) = send(app, "POST", "/char", Some(json!({ "char": "" }))).await;

        assert_eq!(body, json!({ "ok": true }));
        assert_eq!(memory.open_attempts(), 0);
    }

    #[tokio::test]
    async fn test_char_reports_printer_fault() {
        let (app, memory) = app_with(PrinterConfig {
            reconnect_interval_secs: 0,
            max_reconnect_attempts: Some(1),
            ..PrinterConfig::default()
        });
        memory.fail_next_opens(1);

        let (_, body) = send(app, "POST", "/char", Some(json!({ "char": "a" }))).await;

        assert_eq!(body["error"], json!(true));
        assert!(!body["message"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_print_accepts_json_without_content_type() {
        let (app, memory) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/print")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"text": "plain"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(memory.output().ends_with(b"plain\n"));
    }

    #[tokio::test]
    async fn test_char_without_headers() {
        let (app, memory) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/char")
            .body(Body::from(r#"{"char": "k"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(memory.output(), b"k".to_vec());
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, memory) = app();
        let request = Request::builder()
            .method("POST")
            .uri("/print")
            .body(Body::from("not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], json!(true));
        assert_eq!(memory.open_attempts(), 0);
    }
}
