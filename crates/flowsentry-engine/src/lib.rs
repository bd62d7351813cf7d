//! FlowSentry Engine
//!
//! The detection loop tying the pipeline together: record source →
//! classifier port → severity policy → response selection → evidence →
//! alert sink, sequentially per record, with pacing and graceful
//! cancellation.

pub mod cli;
pub mod config;
pub mod detector;

pub use cli::Cli;
pub use config::{DetectorConfig, SeverityThresholds};
pub use detector::{DetectionLoop, DetectionReport, LoopState};
