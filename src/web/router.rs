//! Web application router and middleware setup.

use crate::metrics::registry::MetricRegistry;
use crate::web::config::WebConfig;
use crate::web::handlers;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the axum application with all routes and middleware.
///
/// The registry is injected as shared state; handlers never reach for
/// globals.
pub fn create_app(config: &WebConfig, registry: Arc<MetricRegistry>) -> Router {
    let mut app = Router::new()
        .route("/metrics", get(handlers::get_metrics))
        .route("/api/health", get(handlers::health_check))
        .route("/", get(handlers::default_index))
        .with_state(registry);

    // Add CORS if enabled
    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
