//! Timer-driven sampling loop publishing into the registry.

use crate::metrics::collector::{Collector, CpuCollector, LoadAvgCollector, MemoryCollector};
use crate::metrics::registry::MetricRegistry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Sampling configuration, fixed at construction.
///
/// The core never reads environment variables; the surrounding glue
/// builds one of these and hands it over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Milliseconds between sampling cycles
    pub interval_ms: u64,
    /// Upper bound on one cycle; a stalled OS read is abandoned past this
    pub sample_timeout_ms: u64,
    /// Prefix prepended to every metric name (e.g. "node")
    pub metric_prefix: String,
    /// Whether to emit per-core CPU series
    pub per_core: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: crate::DEFAULT_INTERVAL_MS,
            sample_timeout_ms: 5_000,
            metric_prefix: String::new(),
            per_core: true,
        }
    }
}

impl SamplerConfig {
    /// Set the sampling interval in milliseconds.
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Set the per-cycle timeout in milliseconds.
    pub fn with_sample_timeout_ms(mut self, sample_timeout_ms: u64) -> Self {
        self.sample_timeout_ms = sample_timeout_ms;
        self
    }

    /// Set the metric name prefix.
    pub fn with_metric_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.metric_prefix = prefix.into();
        self
    }

    /// Enable or disable per-core CPU series.
    pub fn with_per_core(mut self, per_core: bool) -> Self {
        self.per_core = per_core;
        self
    }
}

type CollectorFactory = Box<dyn Fn(&SamplerConfig) -> Vec<Box<dyn Collector>> + Send>;

/// The background sampler: runs every collector on a fixed cadence and
/// publishes the results into the shared registry.
pub struct Sampler {
    config: SamplerConfig,
    registry: Arc<MetricRegistry>,
    collectors: Vec<Box<dyn Collector>>,
    factory: CollectorFactory,
}

fn default_collectors(config: &SamplerConfig) -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(CpuCollector::new(&config.metric_prefix, config.per_core)),
        Box::new(MemoryCollector::new(&config.metric_prefix)),
        Box::new(LoadAvgCollector::new(&config.metric_prefix)),
    ]
}

impl Sampler {
    /// Create a sampler over the standard collector set (CPU, memory,
    /// load average).
    pub fn new(config: SamplerConfig, registry: Arc<MetricRegistry>) -> Self {
        Self::with_factory(config, registry, Box::new(default_collectors))
    }

    /// Create a sampler whose collectors come from an explicit factory.
    ///
    /// The factory also rebuilds the set after a timed-out cycle abandons
    /// the previous one on its stuck worker.
    pub fn with_factory(
        config: SamplerConfig,
        registry: Arc<MetricRegistry>,
        factory: CollectorFactory,
    ) -> Self {
        let collectors = factory(&config);
        Self {
            config,
            registry,
            collectors,
            factory,
        }
    }

    /// The configured sampling interval.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.config.interval_ms)
    }

    /// Run the sampling loop until the owning task is dropped.
    ///
    /// Cycles run strictly one at a time: the loop awaits each cycle
    /// before asking the timer again, and ticks that fired in the
    /// meantime are skipped rather than queued.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.sample_once().await;
        }
    }

    /// Run every collector once and publish the results.
    ///
    /// A collector error or an overall timeout keeps the previously
    /// recorded values in the registry; neither stops the process.
    pub async fn sample_once(&mut self) {
        let timeout = Duration::from_millis(self.config.sample_timeout_ms);
        let mut collectors = std::mem::take(&mut self.collectors);

        let worker = tokio::task::spawn_blocking(move || {
            let results: Vec<_> = collectors
                .iter_mut()
                .map(|c| (c.name().to_string(), c.collect()))
                .collect();
            (collectors, results)
        });

        match time::timeout(timeout, worker).await {
            Ok(Ok((collectors, results))) => {
                self.collectors = collectors;
                for (name, result) in results {
                    match result {
                        Ok(samples) => {
                            debug!(collector = %name, series = samples.len(), "published samples");
                            self.registry.set_all(samples);
                        }
                        Err(err) => {
                            warn!(collector = %name, "sample unavailable, keeping previous values: {}", err);
                        }
                    }
                }
            }
            Ok(Err(err)) => {
                warn!("sample worker failed, keeping previous values: {}", err);
                self.collectors = (self.factory)(&self.config);
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.sample_timeout_ms,
                    "sample cycle timed out, keeping previous values"
                );
                // The stuck worker still owns the old collectors.
                self.collectors = (self.factory)(&self.config);
            }
        }
    }
}
