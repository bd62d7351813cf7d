//! End-to-end tests for the detection loop

use flowsentry_classify::{Classifier, ScriptedClassifier, ScriptedOutcome};
use flowsentry_core::{Error, EvidenceEntry, FeatureRecord, ResponseAction, Severity, VecSource};
use flowsentry_engine::{DetectionLoop, DetectorConfig, LoopState};
use flowsentry_telemetry::{FailingSink, MemorySink};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn test_config(evidence_fields: &[&str]) -> DetectorConfig {
    DetectorConfig {
        evidence_fields: evidence_fields.iter().map(|s| s.to_string()).collect(),
        pace_ms: 0,
        ..DetectorConfig::default()
    }
}

fn detector_with_sink(
    config: &DetectorConfig,
    script: Vec<ScriptedOutcome>,
    sink: &MemorySink,
) -> DetectionLoop {
    let classifier: Arc<dyn Classifier> = Arc::new(ScriptedClassifier::new(script));
    DetectionLoop::new(config, classifier, Arc::new(sink.clone()))
}

#[tokio::test]
async fn benign_then_critical_emits_exactly_one_alert() {
    // The canonical two-record drill: benign traffic is silent, the DDoS
    // record produces one Critical alert with ordered evidence.
    let config = test_config(&["A", "B"]);
    let sink = MemorySink::new();
    let mut detector = detector_with_sink(
        &config,
        vec![
            ScriptedOutcome::classify("Normal Traffic", 0.99),
            ScriptedOutcome::classify("DDoS", 0.95),
        ],
        &sink,
    );

    let mut source = VecSource::new(vec![
        FeatureRecord::new().with_field("A", 3.0),
        FeatureRecord::new().with_field("A", 10.0),
    ]);

    let report = detector
        .run(&mut source, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.state, LoopState::Stopped);
    assert_eq!(report.records_seen, 2);
    assert_eq!(report.benign_records, 1);
    assert_eq!(report.alerts_emitted, 1);

    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].label, "DDoS");
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(
        alerts[0].evidence,
        vec![
            EvidenceEntry::new("A", "10"),
            EvidenceEntry::new("B", "N/A"),
        ]
    );
}

#[tokio::test]
async fn severities_follow_confidence_tiers() {
    let config = test_config(&[]);
    let sink = MemorySink::new();
    let mut detector = detector_with_sink(
        &config,
        vec![
            ScriptedOutcome::classify("DDoS", 0.95),
            ScriptedOutcome::classify("PortScan", 0.85),
            ScriptedOutcome::classify("Probe", 0.5),
        ],
        &sink,
    );

    let mut source = VecSource::new(vec![
        FeatureRecord::new(),
        FeatureRecord::new(),
        FeatureRecord::new(),
    ]);

    detector
        .run(&mut source, CancellationToken::new())
        .await
        .unwrap();

    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0].severity, Severity::Critical);
    assert_eq!(alerts[0].action, ResponseAction::BlockSource { rule_id: 992 });
    assert_eq!(alerts[1].severity, Severity::High);
    assert_eq!(alerts[1].action, ResponseAction::EscalateTicket);
    assert_eq!(alerts[2].severity, Severity::Medium);
    assert_eq!(alerts[2].action, ResponseAction::LogForHunting);
}

#[tokio::test(start_paused = true)]
async fn alert_order_matches_source_order_under_latency_variance() {
    let config = test_config(&[]);
    let sink = MemorySink::new();
    let mut detector = detector_with_sink(
        &config,
        vec![
            ScriptedOutcome::classify("Slowest", 0.95).after(Duration::from_millis(50)),
            ScriptedOutcome::classify("Fastest", 0.95).after(Duration::from_millis(5)),
            ScriptedOutcome::classify("Middle", 0.95).after(Duration::from_millis(20)),
        ],
        &sink,
    );

    let mut source = VecSource::new(vec![
        FeatureRecord::new(),
        FeatureRecord::new(),
        FeatureRecord::new(),
    ]);

    detector
        .run(&mut source, CancellationToken::new())
        .await
        .unwrap();

    let labels: Vec<String> = sink.alerts().into_iter().map(|a| a.label).collect();
    assert_eq!(labels, vec!["Slowest", "Fastest", "Middle"]);

    let indices: Vec<u64> = detector
        .audit()
        .events()
        .iter()
        .map(|e| e.record_index)
        .collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[tokio::test]
async fn classification_failure_skips_record_and_continues() {
    let config = test_config(&[]);
    let sink = MemorySink::new();
    let mut detector = detector_with_sink(
        &config,
        vec![
            ScriptedOutcome::fail("malformed feature vector"),
            ScriptedOutcome::classify("DDoS", 0.95),
        ],
        &sink,
    );

    let mut source = VecSource::new(vec![FeatureRecord::new(), FeatureRecord::new()]);

    let report = detector
        .run(&mut source, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.state, LoopState::Stopped);
    assert_eq!(report.records_seen, 2);
    assert_eq!(report.classification_failures, 1);
    assert_eq!(report.alerts_emitted, 1);
    assert_eq!(sink.alerts()[0].label, "DDoS");

    // Both decisions are audited, in order, and the chain holds
    let audit = detector.audit();
    assert!(audit.verify());
    assert_eq!(audit.events().len(), 2);
    assert_eq!(audit.events()[0].record_index, 0);
    assert_eq!(audit.events()[1].record_index, 1);
}

#[tokio::test]
async fn sink_failure_is_fatal() {
    let config = test_config(&[]);
    let classifier: Arc<dyn Classifier> = Arc::new(ScriptedClassifier::new(vec![
        ScriptedOutcome::classify("DDoS", 0.95),
    ]));
    let mut detector =
        DetectionLoop::new(&config, classifier, Arc::new(FailingSink::new("disk full")));

    let mut source = VecSource::new(vec![FeatureRecord::new(), FeatureRecord::new()]);

    let err = detector
        .run(&mut source, CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Sink(_)));
}

#[tokio::test]
async fn benign_stream_emits_nothing() {
    let config = test_config(&["A"]);
    let sink = MemorySink::new();
    let mut detector = detector_with_sink(
        &config,
        vec![
            ScriptedOutcome::classify("Normal Traffic", 0.2),
            ScriptedOutcome::classify("Normal Traffic", 0.99),
        ],
        &sink,
    );

    let mut source = VecSource::new(vec![FeatureRecord::new(), FeatureRecord::new()]);

    let report = detector
        .run(&mut source, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.state, LoopState::Stopped);
    assert_eq!(report.benign_records, 2);
    assert!(sink.is_empty());
    assert!(detector.audit().events().is_empty());
}

#[tokio::test]
async fn pre_cancelled_token_stops_before_first_record() {
    let config = test_config(&[]);
    let sink = MemorySink::new();
    let mut detector = detector_with_sink(
        &config,
        vec![ScriptedOutcome::classify("DDoS", 0.95)],
        &sink,
    );

    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut source = VecSource::new(vec![FeatureRecord::new()]);
    let report = detector.run(&mut source, cancel).await.unwrap();

    assert_eq!(report.state, LoopState::Cancelled);
    assert_eq!(report.records_seen, 0);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn cancellation_during_pacing_processes_no_further_records() {
    let config = DetectorConfig {
        pace_ms: 500,
        ..test_config(&[])
    };
    let sink = MemorySink::new();
    let detector = detector_with_sink(
        &config,
        vec![
            ScriptedOutcome::classify("DDoS", 0.95),
            ScriptedOutcome::classify("PortScan", 0.85),
            ScriptedOutcome::classify("Probe", 0.5),
        ],
        &sink,
    );

    let cancel = CancellationToken::new();
    let run_cancel = cancel.clone();

    let handle = tokio::spawn(async move {
        let mut detector = detector;
        let mut source = VecSource::new(vec![
            FeatureRecord::new(),
            FeatureRecord::new(),
            FeatureRecord::new(),
        ]);
        let report = detector.run(&mut source, run_cancel).await.unwrap();
        (detector, report)
    });

    // Record 0 is processed immediately; cancel lands inside its pacing delay
    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let (detector, report) = handle.await.unwrap();

    assert_eq!(report.state, LoopState::Cancelled);
    assert_eq!(report.records_seen, 1);
    assert_eq!(report.alerts_emitted, 1);

    // Record 0's side effects completed; no partial alert for record 1
    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].label, "DDoS");
    assert!(detector.audit().verify());
}
