//! FlowSentry Policy
//!
//! Pure decision policies for the detection pipeline:
//! - Severity derivation from classification confidence
//! - Severity to containment action mapping
//! - Evidence extraction from feature records
//! - Alert construction with an injected clock
//!
//! Everything in this crate is side-effect-free; the detection loop wires
//! the decisions to the alert sink and the audit trail.

pub mod alert;
pub mod evidence;
pub mod response;
pub mod severity;

pub use alert::AlertBuilder;
pub use evidence::{extract, MISSING_FIELD_MARKER};
pub use response::{ResponsePolicy, DEFAULT_FIREWALL_RULE_ID};
pub use severity::{SeverityPolicy, DEFAULT_CRITICAL_THRESHOLD, DEFAULT_HIGH_THRESHOLD};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::alert::AlertBuilder;
    pub use crate::evidence::{extract, MISSING_FIELD_MARKER};
    pub use crate::response::ResponsePolicy;
    pub use crate::severity::SeverityPolicy;
}
