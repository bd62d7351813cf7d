//! FlowSentry Telemetry
//!
//! Alert routing and audit functionality for the detection pipeline.
//!
//! Provides:
//! - The alert sink seam and the tracing-backed SOC log sink
//! - A hash-chained audit trail of detection decisions
//! - Detection counters and snapshots

pub mod audit;
pub mod metrics;
pub mod sink;

pub use audit::{DetectionAuditTrail, DetectionEvent, DetectionEventKind};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use sink::{AlertSink, FailingSink, MemorySink, TracingSink};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::audit::DetectionAuditTrail;
    pub use crate::metrics::MetricsCollector;
    pub use crate::sink::{AlertSink, MemorySink, TracingSink};
}
