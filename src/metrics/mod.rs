//! Metric sampling, storage and exposition.
//!
//! This module holds the whole sampling-and-exposition pipeline: the
//! collectors that read utilization from the operating system, the
//! timer-driven sampler that publishes their readings, the registry
//! that stores the latest value per series, and the text renderer the
//! scrape endpoint serves.

pub mod collector;
pub mod data;
pub mod exposition;
pub mod registry;
pub mod sampler;

// Re-export commonly used items
pub use collector::{Collector, CpuCollector, LoadAvgCollector, MemoryCollector};
pub use data::{MetricSample, SeriesKey};
pub use registry::{MetricRegistry, Snapshot};
pub use sampler::{Sampler, SamplerConfig};
