//! The embedded typewriter page.

use axum::response::Html;

static INDEX_HTML: &str = include_str!("index.html");

/// Serve the single-page typewriter UI.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}
