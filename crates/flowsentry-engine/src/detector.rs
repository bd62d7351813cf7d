//! Detection loop state machine

use crate::DetectorConfig;
use flowsentry_classify::Classifier;
use flowsentry_core::{Error, RecordSource, Result};
use flowsentry_policy::{evidence, AlertBuilder, ResponsePolicy, SeverityPolicy};
use flowsentry_telemetry::{AlertSink, DetectionAuditTrail, MetricsCollector};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Lifecycle state of a detection run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, not yet run
    Initialized,

    /// Processing records
    Running,

    /// Source exhausted, normal termination
    Stopped,

    /// External cancellation observed
    Cancelled,
}

/// Outcome of a completed detection run
#[derive(Debug, Clone, Copy)]
pub struct DetectionReport {
    /// Terminal loop state
    pub state: LoopState,

    /// Records consumed from the source
    pub records_seen: u64,

    /// Alerts delivered to the sink
    pub alerts_emitted: u64,

    /// Benign classifications (no alert, no audit entry)
    pub benign_records: u64,

    /// Records skipped because the classifier failed on them
    pub classification_failures: u64,
}

/// Sequential detection loop
///
/// One logical worker processes records strictly in arrival order; alert
/// ordering at the sink matches source ordering by construction.
/// Cancellation is observed at iteration boundaries only, so an iteration's
/// side effects are never left half-done.
pub struct DetectionLoop {
    classifier: Arc<dyn Classifier>,
    sink: Arc<dyn AlertSink>,
    severity_policy: SeverityPolicy,
    response_policy: ResponsePolicy,
    alert_builder: AlertBuilder,
    evidence_fields: Vec<String>,
    pace: Duration,
    metrics: MetricsCollector,
    audit: DetectionAuditTrail,
    state: LoopState,
}

impl DetectionLoop {
    /// Create a loop from configuration and injected capabilities
    pub fn new(
        config: &DetectorConfig,
        classifier: Arc<dyn Classifier>,
        sink: Arc<dyn AlertSink>,
    ) -> Self {
        let severity_policy = SeverityPolicy::new(config.benign_labels.iter().cloned())
            .with_thresholds(config.thresholds.high, config.thresholds.critical);

        Self {
            classifier,
            sink,
            severity_policy,
            response_policy: ResponsePolicy::new(config.firewall_rule_id),
            alert_builder: AlertBuilder::system(),
            evidence_fields: config.evidence_fields.clone(),
            pace: config.pace(),
            metrics: MetricsCollector::new(),
            audit: DetectionAuditTrail::new(),
            state: LoopState::Initialized,
        }
    }

    /// Override the alert builder (e.g. to pin the clock in tests)
    pub fn with_alert_builder(mut self, builder: AlertBuilder) -> Self {
        self.alert_builder = builder;
        self
    }

    /// Current loop state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Audit trail of this run's detection decisions
    pub fn audit(&self) -> &DetectionAuditTrail {
        &self.audit
    }

    /// Shared metrics collector for this run
    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    /// Drive the loop until the source is exhausted or cancellation arrives
    ///
    /// A sink failure aborts the run with [`Error::Sink`]; everything
    /// already delivered and audited stays intact, so a caller may restart
    /// from the next unprocessed record.
    pub async fn run(
        &mut self,
        source: &mut dyn RecordSource,
        cancel: CancellationToken,
    ) -> Result<DetectionReport> {
        self.state = LoopState::Running;
        info!(classifier = self.classifier.name(), "detection loop started");

        let mut index: u64 = 0;
        loop {
            if cancel.is_cancelled() {
                self.state = LoopState::Cancelled;
                break;
            }

            let Some(record) = source.next_record().await else {
                self.state = LoopState::Stopped;
                break;
            };
            self.metrics.record_seen();
            metrics::counter!("flowsentry_records_total").increment(1);

            match self.classifier.classify(&record).await {
                Ok(classification) => {
                    let severity = self.severity_policy.severity(&classification);

                    if self.severity_policy.is_benign(&classification.label) {
                        debug!(index, label = %classification.label, "benign record");
                        self.metrics.record_benign();
                    } else {
                        let action = self.response_policy.respond(severity);
                        let evidence = evidence::extract(&record, &self.evidence_fields);
                        let alert =
                            self.alert_builder
                                .build(&classification, severity, action, evidence);

                        self.sink.deliver(&alert).await?;
                        self.audit.record_alert(index, &alert);
                        self.metrics.record_alert();
                        metrics::counter!("flowsentry_alerts_total").increment(1);
                    }
                }
                Err(Error::Classifier(reason)) => {
                    // A single bad record must never halt detection
                    warn!(index, %reason, "classification failed, skipping record");
                    self.audit.record_failure(index, &reason);
                    self.metrics.record_classification_failure();
                    metrics::counter!("flowsentry_classification_failures_total").increment(1);
                }
                Err(other) => return Err(other),
            }

            index += 1;

            if !self.pace.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        self.state = LoopState::Cancelled;
                        break;
                    }
                    _ = tokio::time::sleep(self.pace) => {}
                }
            }
        }

        let report = self.report();
        info!(
            state = ?report.state,
            records = report.records_seen,
            alerts = report.alerts_emitted,
            failures = report.classification_failures,
            "detection loop finished"
        );
        Ok(report)
    }

    fn report(&self) -> DetectionReport {
        let snapshot = self.metrics.snapshot();
        DetectionReport {
            state: self.state,
            records_seen: snapshot.records_seen,
            alerts_emitted: snapshot.alerts_emitted,
            benign_records: snapshot.benign_records,
            classification_failures: snapshot.classification_failures,
        }
    }
}
