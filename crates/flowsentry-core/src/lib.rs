//! FlowSentry Core
//!
//! Core types, traits, and utilities shared across FlowSentry components.
//!
//! This crate provides:
//! - Common types for feature records, classifications, severities, and alerts
//! - Error types and result handling
//! - The record source seam feeding the detection loop
//! - A clock capability for deterministic alert timestamps

pub mod clock;
pub mod error;
pub mod source;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use source::{JsonlSource, RecordSource, VecSource};
pub use types::{
    Alert, Classification, EvidenceEntry, FeatureRecord, FieldValue, ResponseAction, Severity,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, SystemClock};
    pub use crate::error::{Error, Result};
    pub use crate::source::{RecordSource, VecSource};
    pub use crate::types::{
        Alert, Classification, EvidenceEntry, FeatureRecord, FieldValue, ResponseAction, Severity,
    };
}
