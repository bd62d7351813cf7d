//! Hash-chained detection audit trail

use flowsentry_core::{Alert, Severity};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::time::SystemTime;

/// Audit trail of detection decisions with hash-chained events
///
/// Every emitted alert and every skipped classification failure gets an
/// entry; the chain makes after-the-fact tampering detectable. The trail is
/// in-memory; persistence belongs to the surrounding process.
pub struct DetectionAuditTrail {
    events: Vec<DetectionEvent>,
    chain_hash: Option<String>,
}

impl DetectionAuditTrail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            chain_hash: None,
        }
    }

    /// Record an emitted alert
    pub fn record_alert(&mut self, record_index: u64, alert: &Alert) {
        let event = DetectionEvent::new(DetectionEventKind::IntrusionDetected, record_index)
            .with_severity(alert.severity)
            .with_payload(serde_json::json!({
                "alert_id": alert.id,
                "label": alert.label,
                "confidence": alert.confidence,
                "action": alert.action,
                "evidence": alert.evidence,
            }));
        self.append(event);
    }

    /// Record a classification failure that was skipped
    pub fn record_failure(&mut self, record_index: u64, reason: &str) {
        let event = DetectionEvent::new(DetectionEventKind::ClassificationFailed, record_index)
            .with_payload(serde_json::json!({ "reason": reason }));
        self.append(event);
    }

    /// Verify the integrity of the trail
    pub fn verify(&self) -> bool {
        let mut prev_hash: Option<String> = None;

        for event in &self.events {
            if event.previous_hash != prev_hash {
                return false;
            }

            let computed = compute_hash(event);
            if event.hash.as_ref() != Some(&computed) {
                return false;
            }

            prev_hash = event.hash.clone();
        }

        true
    }

    /// All recorded events
    pub fn events(&self) -> &[DetectionEvent] {
        &self.events
    }

    fn append(&mut self, mut event: DetectionEvent) {
        event.previous_hash = self.chain_hash.clone();

        let hash = compute_hash(&event);
        event.hash = Some(hash.clone());

        self.chain_hash = Some(hash);
        self.events.push(event);
    }
}

impl Default for DetectionAuditTrail {
    fn default() -> Self {
        Self::new()
    }
}

fn compute_hash(event: &DetectionEvent) -> String {
    let mut hasher = Sha256::new();

    hasher.update(event.kind.as_str().as_bytes());
    hasher.update(event.record_index.to_be_bytes());
    if let Some(ref payload) = event.payload {
        hasher.update(payload.as_bytes());
    }
    hasher.update(format!("{:?}", event.timestamp).as_bytes());
    if let Some(ref prev) = event.previous_hash {
        hasher.update(prev.as_bytes());
    }

    format!("{:x}", hasher.finalize())
}

/// Kind of detection event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionEventKind {
    /// A non-benign classification produced an alert
    IntrusionDetected,

    /// The classifier could not classify a record; the record was skipped
    ClassificationFailed,
}

impl DetectionEventKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::IntrusionDetected => "intrusion_detected",
            Self::ClassificationFailed => "classification_failed",
        }
    }
}

/// A single event in the detection audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Event kind
    pub kind: DetectionEventKind,

    /// Index of the originating record in the source stream
    pub record_index: u64,

    /// Severity, for alert events
    pub severity: Option<Severity>,

    /// Event payload (JSON serialized)
    pub payload: Option<String>,

    /// Timestamp
    pub timestamp: SystemTime,

    /// Hash of this event
    pub hash: Option<String>,

    /// Hash of the previous event (for chaining)
    pub previous_hash: Option<String>,
}

impl DetectionEvent {
    /// Create a new event
    pub fn new(kind: DetectionEventKind, record_index: u64) -> Self {
        Self {
            kind,
            record_index,
            severity: None,
            payload: None,
            timestamp: SystemTime::now(),
            hash: None,
            previous_hash: None,
        }
    }

    /// Set the event payload
    pub fn with_payload(mut self, payload: impl Serialize) -> Self {
        self.payload = serde_json::to_string(&payload).ok();
        self
    }

    /// Set the severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }
}
