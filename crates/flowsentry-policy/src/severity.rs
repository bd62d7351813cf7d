//! Incident severity derivation

use flowsentry_core::{Classification, Severity};
use std::collections::HashSet;

/// Default confidence threshold above which a threat is High severity
pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.70;

/// Default confidence threshold above which a threat is Critical severity
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.90;

/// Policy mapping a classification to an incident severity
///
/// Benign labels short-circuit to `Low` regardless of confidence; severity
/// escalation is driven by threat classification only. Thresholds are
/// strict, so a confidence exactly at a threshold falls to the lower tier.
#[derive(Debug, Clone)]
pub struct SeverityPolicy {
    benign_labels: HashSet<String>,
    high_threshold: f64,
    critical_threshold: f64,
}

impl SeverityPolicy {
    /// Create a policy with the given benign labels and default thresholds
    pub fn new<I, S>(benign_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            benign_labels: benign_labels.into_iter().map(Into::into).collect(),
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
        }
    }

    /// Override the High/Critical confidence thresholds
    pub fn with_thresholds(mut self, high: f64, critical: f64) -> Self {
        self.high_threshold = high;
        self.critical_threshold = critical;
        self
    }

    /// Check whether a label is configured as benign (exact match)
    pub fn is_benign(&self, label: &str) -> bool {
        self.benign_labels.contains(label)
    }

    /// Derive the severity for a classification
    ///
    /// Out-of-range confidence values are accepted as-is; supplying valid
    /// probabilities is the classifier's contract.
    pub fn severity(&self, classification: &Classification) -> Severity {
        if self.is_benign(&classification.label) {
            return Severity::Low;
        }

        if classification.confidence > self.critical_threshold {
            Severity::Critical
        } else if classification.confidence > self.high_threshold {
            Severity::High
        } else {
            Severity::Medium
        }
    }
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self::new(["Normal Traffic"])
    }
}
