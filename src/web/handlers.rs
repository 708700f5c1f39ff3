//! HTTP handlers for the scrape and health endpoints.

use crate::metrics::exposition::{self, EXPOSITION_CONTENT_TYPE};
use crate::metrics::registry::MetricRegistry;
use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse, Json},
};
use serde_json::json;
use std::sync::Arc;

/// Render the current registry state in the text exposition format.
///
/// Always responds 200: a failed sampling cycle only means the registry
/// still holds the previous values, which is exactly what gets served.
pub async fn get_metrics(State(registry): State<Arc<MetricRegistry>>) -> impl IntoResponse {
    let body = exposition::render(&registry.snapshot());
    ([(CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)], body)
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "hostpulse",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Landing page pointing at the scrape endpoint.
pub async fn default_index() -> Html<&'static str> {
    Html(DEFAULT_INDEX_HTML)
}

const DEFAULT_INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>hostpulse</title>
</head>
<body>
    <h1>hostpulse</h1>
    <p>Host CPU metrics exporter.</p>
    <p>Visit <a href="/metrics">/metrics</a> for the current metrics document.</p>
</body>
</html>"#;
