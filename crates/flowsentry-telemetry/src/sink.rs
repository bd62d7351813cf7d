//! Alert sinks

use async_trait::async_trait;
use flowsentry_core::{Alert, Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::warn;

/// Destination for emitted alerts
///
/// Sinks receive alerts strictly in source arrival order and are expected
/// to be append-only. A sink failure is fatal for the run: alerts must not
/// be silently dropped.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert
    async fn deliver(&self, alert: &Alert) -> Result<()>;
}

/// Sink logging each alert as a structured warning
///
/// This is the SOC log line of the pipeline; persistence of the log itself
/// is the logging backend's concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait]
impl AlertSink for TracingSink {
    async fn deliver(&self, alert: &Alert) -> Result<()> {
        warn!(
            alert_id = %alert.id,
            label = %alert.label,
            confidence = alert.confidence,
            severity = %alert.severity,
            action = %alert.action,
            evidence = %alert.evidence_summary(),
            "INTRUSION DETECTED"
        );
        Ok(())
    }
}

/// In-memory sink recording alerts for assertions
#[derive(Clone, Default)]
pub struct MemorySink {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all delivered alerts, in delivery order
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }

    /// Number of delivered alerts
    pub fn len(&self) -> usize {
        self.alerts.lock().len()
    }

    /// Check if no alerts were delivered
    pub fn is_empty(&self) -> bool {
        self.alerts.lock().is_empty()
    }
}

#[async_trait]
impl AlertSink for MemorySink {
    async fn deliver(&self, alert: &Alert) -> Result<()> {
        self.alerts.lock().push(alert.clone());
        Ok(())
    }
}

/// Sink refusing every alert, for exercising the fatal sink path
#[derive(Debug, Clone)]
pub struct FailingSink {
    message: String,
}

impl FailingSink {
    /// Create a sink failing with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl AlertSink for FailingSink {
    async fn deliver(&self, _alert: &Alert) -> Result<()> {
        Err(Error::sink(self.message.clone()))
    }
}
