//! System collectors backed by sysinfo.

use crate::error::{ExporterError, Result};
use crate::metrics::data::MetricSample;
use sysinfo::System;

/// A source of current gauge readings.
///
/// Collectors are synchronous; the sampler moves the whole set onto a
/// blocking worker for each cycle, so implementations may touch `/proc`
/// or other blocking OS interfaces directly.
pub trait Collector: Send {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produce the current samples for this source.
    ///
    /// An error means no reading was possible this cycle; the sampler
    /// keeps the previously recorded values and the process continues.
    fn collect(&mut self) -> Result<Vec<MetricSample>>;
}

fn prefixed(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}_{}", prefix, name)
    }
}

/// Aggregate and per-core CPU utilization, in percent.
///
/// sysinfo computes usage as a delta between refreshes, so the collector
/// owns its `System` across cycles; the first cycle after startup reads
/// as zero until the second refresh establishes a baseline.
pub struct CpuCollector {
    system: System,
    usage_name: String,
    core_name: String,
    per_core: bool,
}

impl CpuCollector {
    /// Create a CPU collector. The initial refresh seeds sysinfo's
    /// CPU time accounting.
    pub fn new(prefix: &str, per_core: bool) -> Self {
        let mut system = System::new();
        system.refresh_cpu_all();

        Self {
            system,
            usage_name: prefixed(prefix, "cpu_usage_percent"),
            core_name: prefixed(prefix, "cpu_core_usage_percent"),
            per_core,
        }
    }
}

impl Collector for CpuCollector {
    fn name(&self) -> &str {
        "cpu"
    }

    fn collect(&mut self) -> Result<Vec<MetricSample>> {
        self.system.refresh_cpu_all();

        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(ExporterError::sample_error("no CPU information available"));
        }

        let mut samples = Vec::with_capacity(1 + cpus.len());
        samples.push(MetricSample::new(
            self.usage_name.clone(),
            f64::from(self.system.global_cpu_usage()),
        ));

        if self.per_core {
            for (i, cpu) in cpus.iter().enumerate() {
                samples.push(MetricSample::with_labels(
                    self.core_name.clone(),
                    f64::from(cpu.cpu_usage()),
                    vec![("core".to_string(), i.to_string())],
                ));
            }
        }

        Ok(samples)
    }
}

/// Memory totals and utilization, mirroring the meminfo gauges.
pub struct MemoryCollector {
    system: System,
    total_name: String,
    available_name: String,
    used_name: String,
    usage_name: String,
}

impl MemoryCollector {
    /// Create a memory collector.
    pub fn new(prefix: &str) -> Self {
        Self {
            system: System::new(),
            total_name: prefixed(prefix, "memory_total_bytes"),
            available_name: prefixed(prefix, "memory_available_bytes"),
            used_name: prefixed(prefix, "memory_used_bytes"),
            usage_name: prefixed(prefix, "memory_usage_percent"),
        }
    }
}

impl Collector for MemoryCollector {
    fn name(&self) -> &str {
        "memory"
    }

    fn collect(&mut self) -> Result<Vec<MetricSample>> {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return Err(ExporterError::sample_error(
                "no memory information available",
            ));
        }

        let available = self.system.available_memory();
        let used = self.system.used_memory();
        let usage_percent = (used as f64 / total as f64) * 100.0;

        Ok(vec![
            MetricSample::new(self.total_name.clone(), total as f64),
            MetricSample::new(self.available_name.clone(), available as f64),
            MetricSample::new(self.used_name.clone(), used as f64),
            MetricSample::new(self.usage_name.clone(), usage_percent),
        ])
    }
}

/// System load averages over the 1, 5 and 15 minute windows.
pub struct LoadAvgCollector {
    load_name: String,
}

impl LoadAvgCollector {
    /// Create a load-average collector.
    pub fn new(prefix: &str) -> Self {
        Self {
            load_name: prefixed(prefix, "load_average"),
        }
    }
}

impl Collector for LoadAvgCollector {
    fn name(&self) -> &str {
        "loadavg"
    }

    fn collect(&mut self) -> Result<Vec<MetricSample>> {
        let load = System::load_average();

        Ok(vec![
            MetricSample::with_labels(
                self.load_name.clone(),
                load.one,
                vec![("window".to_string(), "1m".to_string())],
            ),
            MetricSample::with_labels(
                self.load_name.clone(),
                load.five,
                vec![("window".to_string(), "5m".to_string())],
            ),
            MetricSample::with_labels(
                self.load_name.clone(),
                load.fifteen,
                vec![("window".to_string(), "15m".to_string())],
            ),
        ])
    }
}
