//! FlowSentry
//!
//! Real-time network-intrusion alerting pipeline: replays a traffic
//! feature stream through the classifier port, derives severities, and
//! emits structured alerts with supporting evidence.

use anyhow::Result;
use clap::Parser;
use flowsentry_classify::ReplayClassifier;
use flowsentry_core::JsonlSource;
use flowsentry_engine::{Cli, DetectionLoop, DetectorConfig};
use flowsentry_telemetry::TracingSink;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    init_metrics();

    info!("Starting FlowSentry detection engine");
    let config = DetectorConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded successfully");
    info!("Benign labels: {:?}", config.benign_labels);
    info!("Evidence fields: {:?}", config.evidence_fields);
    info!("Pacing: {}ms", config.pace_ms);
    info!("Record stream: {}", cli.records);

    let mut source = JsonlSource::open(&cli.records)?;
    let classifier = Arc::new(ReplayClassifier::new(
        cli.label_field.clone(),
        cli.confidence_field.clone(),
    ));
    let sink = Arc::new(TracingSink);

    let mut detector = DetectionLoop::new(&config, classifier, sink);

    // Wire ctrl-c to the cancellation token; the loop finishes the current
    // iteration before terminating.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Shutdown signal received, stopping after current record...");
            signal_cancel.cancel();
        }
    });

    let report = detector.run(&mut source, cancel).await?;

    info!(
        state = ?report.state,
        records = report.records_seen,
        alerts = report.alerts_emitted,
        benign = report.benign_records,
        failures = report.classification_failures,
        "Detection run complete"
    );

    if !detector.audit().verify() {
        warn!("Audit trail failed integrity verification");
    }

    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("flowsentry=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowsentry=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Describe the counters emitted by the detection loop
fn init_metrics() {
    metrics::describe_counter!(
        "flowsentry_records_total",
        "Total number of records consumed from the source"
    );
    metrics::describe_counter!(
        "flowsentry_alerts_total",
        "Total number of alerts delivered to the sink"
    );
    metrics::describe_counter!(
        "flowsentry_classification_failures_total",
        "Total number of records skipped due to classifier failures"
    );
}
