//! # hostpulse - Host CPU Metrics Exporter
//!
//! A small exporter that periodically samples host CPU utilization (plus
//! memory and load-average gauges), keeps the latest values in an
//! in-memory registry, and serves them over HTTP in the Prometheus text
//! exposition format for pull-based scrapers.
//!
//! ## Pipeline
//!
//! - **Collectors** read utilization from the operating system
//! - **Sampler** runs them on a fixed cadence and publishes into the
//!   registry; cycles never overlap and a stalled OS read is abandoned
//!   after a hard timeout
//! - **MetricRegistry** holds the latest value per series, safe against
//!   concurrent scrape reads and sampler writes
//! - **Exposition** renders a registry snapshot deterministically;
//!   `GET /metrics` serves it with content type
//!   `text/plain; version=0.0.4`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hostpulse::{start_web_server, MetricRegistry, Sampler, SamplerConfig, WebConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(MetricRegistry::new());
//!     let sampler = Sampler::new(SamplerConfig::default(), registry.clone());
//!     tokio::spawn(sampler.run());
//!
//!     // Serve scrapes on port 9100
//!     start_web_server(WebConfig::default(), registry).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metrics;
pub mod web;

// Re-export public API
pub use error::{ExporterError, Result};
pub use metrics::{
    collector::{Collector, CpuCollector, LoadAvgCollector, MemoryCollector},
    data::{MetricSample, SeriesKey},
    exposition::{render, EXPOSITION_CONTENT_TYPE},
    registry::{MetricRegistry, Snapshot},
    sampler::{Sampler, SamplerConfig},
};
pub use web::{create_app, start_web_server, WebConfig};

/// The default sampling interval in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// The default web server port
pub const DEFAULT_WEB_PORT: u16 = 9100;
