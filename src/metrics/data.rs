//! Data structures for metric samples and series identity.

use serde::{Deserialize, Serialize};

/// A single named measurement destined for the registry.
///
/// The metric name together with the label set uniquely identifies a
/// time series. Utilization values are percentages in the 0.0 to 100.0
/// range; the memory supplements carry byte counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Metric name, stable across the process lifetime
    pub name: String,
    /// Current value of the gauge
    pub value: f64,
    /// Label pairs, kept sorted by key (may be empty)
    pub labels: Vec<(String, String)>,
}

impl MetricSample {
    /// Create an unlabeled sample.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            labels: Vec::new(),
        }
    }

    /// Create a labeled sample.
    ///
    /// Labels are sorted by key so that equal label sets compare equal
    /// regardless of insertion order.
    pub fn with_labels(
        name: impl Into<String>,
        value: f64,
        mut labels: Vec<(String, String)>,
    ) -> Self {
        labels.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            name: name.into(),
            value,
            labels,
        }
    }

    /// The series identity of this sample.
    pub fn key(&self) -> SeriesKey {
        SeriesKey {
            name: self.name.clone(),
            labels: self.labels.clone(),
        }
    }
}

/// Series identity: metric name plus sorted label pairs.
///
/// The derived ordering (name first, then label pairs) is what makes
/// registry iteration and exposition output deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    /// Metric name
    pub name: String,
    /// Sorted label pairs
    pub labels: Vec<(String, String)>,
}
