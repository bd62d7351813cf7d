//! Command-line interface

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "flowsentry")]
#[command(about = "FlowSentry real-time intrusion alerting pipeline", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "flowsentry.yaml")]
    pub config: String,

    /// Traffic record file (one JSON object per line)
    #[arg(short, long)]
    pub records: String,

    /// Inter-record pacing delay in milliseconds
    #[arg(long)]
    pub pace_ms: Option<u64>,

    /// Record field carrying the replay label
    #[arg(long, default_value = "label")]
    pub label_field: String,

    /// Record field carrying the replay confidence
    #[arg(long, default_value = "confidence")]
    pub confidence_field: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
