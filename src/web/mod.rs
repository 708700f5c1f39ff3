//! Web server and scrape endpoints for the hostpulse exporter.
//!
//! Serves the metrics document at `/metrics`, a health check at
//! `/api/health` and a small landing page at `/`. The registry is
//! shared into the handlers as axum state; the sampler feeding it runs
//! independently of any request.

pub mod config;
pub mod handlers;
pub mod router;

// Re-export commonly used items
pub use config::WebConfig;
pub use router::create_app;

use crate::error::{ExporterError, Result};
use crate::metrics::registry::MetricRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

/// Start the web server and serve scrapes until the process exits.
pub async fn start_web_server(config: WebConfig, registry: Arc<MetricRegistry>) -> Result<()> {
    let app = create_app(&config, registry);

    // Parse the bind address
    let addr = config
        .bind_address()
        .parse::<SocketAddr>()
        .map_err(|e| ExporterError::config_error(format!("Invalid bind address: {}", e)))?;

    info!("Starting hostpulse exporter on http://{}", addr);
    info!("Metrics endpoint: http://{}/metrics", addr);
    info!("Health endpoint: http://{}/api/health", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Failed to bind to address: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::web_server_error(format!("Server error: {}", e)))?;

    Ok(())
}
