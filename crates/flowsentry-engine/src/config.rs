//! Detector configuration

use flowsentry_policy::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_FIREWALL_RULE_ID, DEFAULT_HIGH_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Detection loop configuration
///
/// Everything a SOC would tune lives here rather than in code: benign
/// labels, watched evidence fields, pacing, and the severity thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Labels treated as benign (exact match against any entry)
    #[serde(default = "default_benign_labels")]
    pub benign_labels: Vec<String>,

    /// Ordered list of record fields attached to alerts as evidence
    #[serde(default = "default_evidence_fields")]
    pub evidence_fields: Vec<String>,

    /// Inter-record pacing delay in milliseconds
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,

    /// Confidence thresholds for the High/Critical tiers
    #[serde(default)]
    pub thresholds: SeverityThresholds,

    /// Simulated firewall rule referenced by block actions
    #[serde(default = "default_firewall_rule_id")]
    pub firewall_rule_id: u32,
}

impl DetectorConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::Cli) -> anyhow::Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        if let Some(pace_ms) = cli.pace_ms {
            config.pace_ms = pace_ms;
        }

        Ok(config)
    }

    /// Pacing delay as a duration
    pub fn pace(&self) -> Duration {
        Duration::from_millis(self.pace_ms)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            benign_labels: default_benign_labels(),
            evidence_fields: default_evidence_fields(),
            pace_ms: default_pace_ms(),
            thresholds: SeverityThresholds::default(),
            firewall_rule_id: default_firewall_rule_id(),
        }
    }
}

/// Confidence thresholds for severity tiers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeverityThresholds {
    /// Strictly above this confidence is at least High
    #[serde(default = "default_high_threshold")]
    pub high: f64,

    /// Strictly above this confidence is Critical
    #[serde(default = "default_critical_threshold")]
    pub critical: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            high: default_high_threshold(),
            critical: default_critical_threshold(),
        }
    }
}

fn default_benign_labels() -> Vec<String> {
    vec!["Normal Traffic".to_string()]
}

fn default_evidence_fields() -> Vec<String> {
    vec![
        "Bwd Packet Length Std".to_string(),
        "Destination Port".to_string(),
        "Flow Duration".to_string(),
    ]
}

fn default_pace_ms() -> u64 {
    500
}

fn default_high_threshold() -> f64 {
    DEFAULT_HIGH_THRESHOLD
}

fn default_critical_threshold() -> f64 {
    DEFAULT_CRITICAL_THRESHOLD
}

fn default_firewall_rule_id() -> u32 {
    DEFAULT_FIREWALL_RULE_ID
}
