//! Severity to containment action mapping

use flowsentry_core::{ResponseAction, Severity};

/// Default simulated firewall rule referenced by block actions
pub const DEFAULT_FIREWALL_RULE_ID: u32 = 992;

/// Policy selecting the containment action for a severity tier
///
/// The mapping is total and side-effect-free; it describes the action, it
/// does not invoke a firewall or ticketing system.
#[derive(Debug, Clone)]
pub struct ResponsePolicy {
    firewall_rule_id: u32,
}

impl ResponsePolicy {
    /// Create a policy referencing the given firewall rule for blocks
    pub fn new(firewall_rule_id: u32) -> Self {
        Self { firewall_rule_id }
    }

    /// Select the action for a severity tier
    pub fn respond(&self, severity: Severity) -> ResponseAction {
        match severity {
            Severity::Critical => ResponseAction::BlockSource {
                rule_id: self.firewall_rule_id,
            },
            Severity::High => ResponseAction::EscalateTicket,
            Severity::Medium => ResponseAction::LogForHunting,
            Severity::Low => ResponseAction::Allow,
        }
    }
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FIREWALL_RULE_ID)
    }
}
