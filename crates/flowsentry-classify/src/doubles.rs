//! Substitutable classifier doubles
//!
//! The classifier is an external capability; these doubles stand in for it
//! in tests, drills, and the replay mode of the engine binary.

use crate::Classifier;
use async_trait::async_trait;
use flowsentry_core::{Classification, Error, FeatureRecord, FieldValue, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;

/// Classifier returning the same label and confidence for every record
#[derive(Debug, Clone)]
pub struct FixedClassifier {
    label: String,
    confidence: f64,
}

impl FixedClassifier {
    /// Create a classifier pinned to one classification
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(&self, _record: &FeatureRecord) -> Result<Classification> {
        Ok(Classification::new(self.label.clone(), self.confidence))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// One prepared outcome for a [`ScriptedClassifier`]
#[derive(Debug, Clone)]
pub struct ScriptedOutcome {
    outcome: Outcome,
    latency: Option<Duration>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Classify(Classification),
    Fail(String),
}

impl ScriptedOutcome {
    /// Outcome producing a classification
    pub fn classify(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            outcome: Outcome::Classify(Classification::new(label, confidence)),
            latency: None,
        }
    }

    /// Outcome producing a classifier failure
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Fail(message.into()),
            latency: None,
        }
    }

    /// Delay this outcome by an artificial latency
    pub fn after(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

/// Classifier replaying a prepared queue of outcomes, one per record
///
/// Per-outcome latency lets tests induce classifier jitter and check that
/// alert ordering still matches arrival order.
pub struct ScriptedClassifier {
    script: Mutex<VecDeque<ScriptedOutcome>>,
}

impl ScriptedClassifier {
    /// Create a classifier over a prepared script
    pub fn new(script: Vec<ScriptedOutcome>) -> Self {
        Self {
            script: Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl Classifier for ScriptedClassifier {
    async fn classify(&self, _record: &FeatureRecord) -> Result<Classification> {
        let step = self
            .script
            .lock()
            .pop_front()
            .ok_or_else(|| Error::classifier("script exhausted"))?;

        if let Some(latency) = step.latency {
            tokio::time::sleep(latency).await;
        }

        match step.outcome {
            Outcome::Classify(classification) => Ok(classification),
            Outcome::Fail(message) => Err(Error::classifier(message)),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Classifier echoing a label and confidence embedded in the record
///
/// Replay feeds carry the ground-truth label alongside the features; this
/// double turns such a feed into classifier output for drills.
#[derive(Debug, Clone)]
pub struct ReplayClassifier {
    label_field: String,
    confidence_field: String,
}

impl ReplayClassifier {
    /// Create a replay classifier reading the given columns
    pub fn new(label_field: impl Into<String>, confidence_field: impl Into<String>) -> Self {
        Self {
            label_field: label_field.into(),
            confidence_field: confidence_field.into(),
        }
    }
}

impl Default for ReplayClassifier {
    fn default() -> Self {
        Self::new("label", "confidence")
    }
}

#[async_trait]
impl Classifier for ReplayClassifier {
    async fn classify(&self, record: &FeatureRecord) -> Result<Classification> {
        let label = match record.get(&self.label_field) {
            Some(FieldValue::Text(label)) => label.clone(),
            Some(FieldValue::Number(n)) => n.to_string(),
            None => {
                return Err(Error::classifier(format!(
                    "record has no '{}' field",
                    self.label_field
                )))
            }
        };

        let confidence = match record.get(&self.confidence_field) {
            Some(FieldValue::Number(confidence)) => *confidence,
            Some(FieldValue::Text(_)) | None => {
                return Err(Error::classifier(format!(
                    "record has no numeric '{}' field",
                    self.confidence_field
                )))
            }
        };

        Ok(Classification::new(label, confidence))
    }

    fn name(&self) -> &str {
        "replay"
    }
}

/// Classifier failing every record
#[derive(Debug, Clone)]
pub struct FailingClassifier {
    message: String,
}

impl FailingClassifier {
    /// Create a classifier failing with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _record: &FeatureRecord) -> Result<Classification> {
        Err(Error::classifier(self.message.clone()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
