//! Concurrency-safe store of current metric values.

use crate::metrics::data::{MetricSample, SeriesKey};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A point-in-time view of every series in the registry.
///
/// Ordered by series identity, so iterating a snapshot is deterministic.
pub type Snapshot = BTreeMap<SeriesKey, f64>;

/// Last-write-wins store of current gauge values.
///
/// Constructed once at startup and shared (behind an `Arc`) between the
/// sampler, which writes, and the scrape handlers, which read. A snapshot
/// clones the whole map under the read lock, so readers never observe a
/// partially applied update: one `set` inserts name, labels and value as
/// a single entry, and a batched `set_all` is visible all-or-nothing.
///
/// Neither lock is ever held across an `.await`.
#[derive(Debug, Default)]
pub struct MetricRegistry {
    series: RwLock<BTreeMap<SeriesKey, f64>>,
}

impl MetricRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the current value for the sample's series identity.
    ///
    /// Absent series are created implicitly; this never fails.
    pub fn set(&self, sample: MetricSample) {
        self.set_all(std::iter::once(sample));
    }

    /// Publish a batch of samples under a single write lock.
    ///
    /// Used by the sampler so that one collection cycle lands atomically
    /// with respect to concurrent snapshots.
    pub fn set_all(&self, samples: impl IntoIterator<Item = MetricSample>) {
        let mut series = self.series_write();
        for sample in samples {
            let MetricSample {
                name,
                value,
                labels,
            } = sample;
            series.insert(SeriesKey { name, labels }, value);
        }
    }

    /// Return an internally consistent copy of all current series.
    pub fn snapshot(&self) -> Snapshot {
        self.series_read().clone()
    }

    /// Number of series currently recorded.
    pub fn len(&self) -> usize {
        self.series_read().len()
    }

    /// Whether the registry holds no series.
    pub fn is_empty(&self) -> bool {
        self.series_read().is_empty()
    }

    // A poisoned lock still holds the last fully applied state, so both
    // accessors recover the guard instead of propagating the panic.
    fn series_read(&self) -> RwLockReadGuard<'_, BTreeMap<SeriesKey, f64>> {
        match self.series.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn series_write(&self) -> RwLockWriteGuard<'_, BTreeMap<SeriesKey, f64>> {
        match self.series.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
