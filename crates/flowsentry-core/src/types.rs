//! Core types for the FlowSentry detection pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;
use uuid::Uuid;

/// A single field value in a traffic feature record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric feature (packet counts, durations, byte lengths)
    Number(f64),

    /// Textual feature (protocol names, categorical flags)
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One observed traffic sample: an ordered mapping from feature name to value
///
/// Records are immutable once handed to the detection loop and live for a
/// single loop iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    fields: Vec<(String, FieldValue)>,
}

impl FeatureRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, preserving insertion order
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field at the end of the record
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Look up a field by exact name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a record from a JSON object
    ///
    /// Numbers become numeric fields; everything else is carried as text so
    /// a schema drift in the feed never loses a value.
    pub fn from_json(value: &serde_json::Value) -> crate::Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| crate::Error::source("record is not a JSON object"))?;

        let mut record = Self::new();
        for (name, field) in object {
            match field {
                serde_json::Value::Number(n) => {
                    record.insert(name, n.as_f64().unwrap_or(f64::NAN));
                }
                serde_json::Value::String(s) => record.insert(name, s.clone()),
                other => record.insert(name, other.to_string()),
            }
        }
        Ok(record)
    }
}

/// Classification of a record by the external classifier port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted traffic label
    pub label: String,

    /// Confidence score (0.0-1.0), always present even for benign labels
    pub confidence: f64,
}

impl Classification {
    /// Create a new classification
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Incident severity tier derived from classification confidence
///
/// The derived ordering is the escalation order; `Low` is reserved for
/// benign classifications.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}

/// Containment action associated with a severity tier
///
/// Actions describe the containment step; nothing here talks to a firewall
/// or ticketing system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum ResponseAction {
    /// Block the source address, referencing a simulated firewall rule
    BlockSource {
        /// Simulated firewall rule identifier
        rule_id: u32,
    },

    /// Escalate to a tier 2 analyst ticket
    EscalateTicket,

    /// Record for later threat hunting (passive)
    LogForHunting,

    /// Allow the traffic, no containment
    Allow,
}

impl fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockSource { rule_id } => {
                write!(f, "Block source address (firewall rule #{})", rule_id)
            }
            Self::EscalateTicket => write!(f, "Escalate to Tier 2 analyst ticket"),
            Self::LogForHunting => write!(f, "Log for threat hunting"),
            Self::Allow => write!(f, "Allow"),
        }
    }
}

/// A single piece of supporting evidence attached to an alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    /// Feature name, as configured in the watched-field list
    pub field: String,

    /// Rendered value, or the missing-field marker
    pub value: String,
}

impl EvidenceEntry {
    /// Create a new evidence entry
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// A structured intrusion alert, emitted once per non-benign classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique alert identifier
    pub id: Uuid,

    /// When the alert was built
    pub timestamp: SystemTime,

    /// Predicted traffic label
    pub label: String,

    /// Classifier confidence for the prediction
    pub confidence: f64,

    /// Derived incident severity
    pub severity: Severity,

    /// Recommended containment action
    pub action: ResponseAction,

    /// Supporting field values from the originating record
    pub evidence: Vec<EvidenceEntry>,
}

impl Alert {
    /// Render the evidence as a single pipe-separated summary line
    pub fn evidence_summary(&self) -> String {
        self.evidence
            .iter()
            .map(|entry| format!("{}: {}", entry.field, entry.value))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_insertion_order() {
        let record = FeatureRecord::new()
            .with_field("Flow Duration", 120.0)
            .with_field("Protocol", "TCP")
            .with_field("Destination Port", 443.0);

        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Flow Duration", "Protocol", "Destination Port"]);
    }

    #[test]
    fn test_record_lookup() {
        let record = FeatureRecord::new().with_field("Destination Port", 443.0);

        assert_eq!(
            record.get("Destination Port"),
            Some(&FieldValue::Number(443.0))
        );
        assert_eq!(record.get("Source Port"), None);
    }

    #[test]
    fn test_record_from_json() {
        let value = serde_json::json!({
            "Destination Port": 80,
            "Protocol": "UDP",
        });

        let record = FeatureRecord::from_json(&value).unwrap();
        assert_eq!(record.get("Destination Port"), Some(&FieldValue::Number(80.0)));
        assert_eq!(
            record.get("Protocol"),
            Some(&FieldValue::Text("UDP".to_string()))
        );
    }

    #[test]
    fn test_record_from_json_rejects_non_object() {
        let value = serde_json::json!([1, 2, 3]);
        assert!(FeatureRecord::from_json(&value).is_err());
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Number(10.0).to_string(), "10");
        assert_eq!(FieldValue::Number(0.5).to_string(), "0.5");
        assert_eq!(FieldValue::Text("TCP".to_string()).to_string(), "TCP");
    }

    #[test]
    fn test_severity_escalation_order() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_response_action_description() {
        let action = ResponseAction::BlockSource { rule_id: 992 };
        assert_eq!(
            action.to_string(),
            "Block source address (firewall rule #992)"
        );
    }
}
