//! Metrics collection for the detection loop

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counter collector shared across a detection run
#[derive(Clone, Default)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    records_seen: AtomicU64,
    benign_records: AtomicU64,
    alerts_emitted: AtomicU64,
    classification_failures: AtomicU64,
}

impl MetricsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a consumed source record
    pub fn record_seen(&self) {
        self.inner.records_seen.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a benign classification (no alert)
    pub fn record_benign(&self) {
        self.inner.benign_records.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an emitted alert
    pub fn record_alert(&self) {
        self.inner.alerts_emitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a skipped classification failure
    pub fn record_classification_failure(&self) {
        self.inner
            .classification_failures
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_seen: self.inner.records_seen.load(Ordering::Relaxed),
            benign_records: self.inner.benign_records.load(Ordering::Relaxed),
            alerts_emitted: self.inner.alerts_emitted.load(Ordering::Relaxed),
            classification_failures: self
                .inner
                .classification_failures
                .load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of detection counters
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub records_seen: u64,
    pub benign_records: u64,
    pub alerts_emitted: u64,
    pub classification_failures: u64,
}

impl MetricsSnapshot {
    /// Fraction of seen records that produced an alert
    pub fn alert_rate(&self) -> f64 {
        if self.records_seen == 0 {
            0.0
        } else {
            self.alerts_emitted as f64 / self.records_seen as f64
        }
    }

    /// Fraction of seen records the classifier failed on
    pub fn failure_rate(&self) -> f64 {
        if self.records_seen == 0 {
            0.0
        } else {
            self.classification_failures as f64 / self.records_seen as f64
        }
    }
}
