//! Alert construction

use flowsentry_core::{
    Alert, Classification, Clock, EvidenceEntry, ResponseAction, Severity, SystemClock,
};
use std::sync::Arc;
use uuid::Uuid;

/// Composes classifications, policy decisions, and evidence into alerts
///
/// The clock is injected so alert timestamps are deterministic under test.
/// Builders are only invoked for non-benign classifications; benign traffic
/// produces no alert at all.
#[derive(Clone)]
pub struct AlertBuilder {
    clock: Arc<dyn Clock>,
}

impl AlertBuilder {
    /// Create a builder stamping alerts from the given clock
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Create a builder using wall-clock time
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Build an alert for a non-benign classification
    pub fn build(
        &self,
        classification: &Classification,
        severity: Severity,
        action: ResponseAction,
        evidence: Vec<EvidenceEntry>,
    ) -> Alert {
        Alert {
            id: Uuid::new_v4(),
            timestamp: self.clock.now(),
            label: classification.label.clone(),
            confidence: classification.confidence,
            severity,
            action,
            evidence,
        }
    }
}
