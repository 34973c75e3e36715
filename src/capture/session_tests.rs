// Unit tests for GesturePipeline driven tick by tick, with no timers.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::capture::sink::MemorySink;
use crate::capture::source::FixedLandmarkSource;
use crate::catalog::GestureCatalog;
use crate::config::AppConfig;
use crate::engine::time::StubTimeSource;
use crate::error::{InferenceError, InferenceErrorCodes};
use crate::recognition::window::SEQUENCE_LENGTH;
use crate::recognition::{Classifier, Decision, RejectReason};
use crate::testing::{FailingClassifier, FixedOutcomeClassifier};

use super::*;

struct Harness {
    pipeline: GesturePipeline,
    sink: Arc<MemorySink>,
    decisions: broadcast::Receiver<Decision>,
}

fn harness(classifier: Arc<dyn Classifier>) -> Harness {
    let sink = Arc::new(MemorySink::new());
    let (decision_tx, decisions) = broadcast::channel(32);
    let ctx = PipelineContext {
        config: Arc::new(RwLock::new(AppConfig::default())),
        catalog: Arc::new(GestureCatalog::builtin()),
        classifier,
        time_source: Arc::new(StubTimeSource::new(1_000, 100)),
        sink: Arc::clone(&sink) as Arc<dyn ResultSink>,
        decision_tx,
    };
    Harness {
        pipeline: GesturePipeline::new(ctx, "session_test".to_string()),
        sink,
        decisions,
    }
}

#[tokio::test]
async fn test_full_window_emits_one_accepted_result() {
    let classifier = Arc::new(FixedOutcomeClassifier::new(0, 0.95, 11));
    let mut h = harness(Arc::clone(&classifier) as Arc<dyn Classifier>);
    let source = FixedLandmarkSource::zeroed();

    for _ in 0..SEQUENCE_LENGTH {
        h.pipeline.tick(&source).await;
    }

    assert_eq!(classifier.calls(), 1);
    let results = h.sink.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].gesture.name, "1");
    assert_eq!(results[0].session_id, "session_test");
    assert!(h.pipeline.buffer_status().current == 0);
    assert_eq!(h.pipeline.state(), SessionState::Capturing);

    let decision = h.decisions.try_recv().unwrap();
    assert!(decision.is_accepted());
}

#[tokio::test]
async fn test_low_confidence_rejects_and_resets_buffer() {
    let classifier = Arc::new(FixedOutcomeClassifier::new(0, 0.4, 11));
    let mut h = harness(classifier as Arc<dyn Classifier>);
    let source = FixedLandmarkSource::zeroed();

    for _ in 0..SEQUENCE_LENGTH {
        h.pipeline.tick(&source).await;
    }

    assert!(h.sink.is_empty());
    assert_eq!(h.pipeline.buffer_status().current, 0);
    match h.decisions.try_recv().unwrap() {
        Decision::Rejected(RejectReason::LowConfidence { confidence, threshold }) => {
            assert!((confidence - 0.4).abs() < f32::EPSILON);
            assert!((threshold - 0.7).abs() < f32::EPSILON);
        }
        other => panic!("expected low-confidence reject, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_class_rejects() {
    let classifier = Arc::new(FixedOutcomeClassifier::new(99, 0.95, 11));
    let mut h = harness(classifier as Arc<dyn Classifier>);
    let source = FixedLandmarkSource::zeroed();

    for _ in 0..SEQUENCE_LENGTH {
        h.pipeline.tick(&source).await;
    }

    assert!(h.sink.is_empty());
    assert_eq!(
        h.decisions.try_recv().unwrap(),
        Decision::Rejected(RejectReason::UnknownClass { class_index: 99 })
    );
}

#[tokio::test]
async fn test_inference_failure_is_rejected_not_fatal() {
    let classifier = Arc::new(FailingClassifier::new(
        InferenceError::BackendFailed {
            details: "tensor allocation failed".to_string(),
        },
        11,
    ));
    let mut h = harness(classifier as Arc<dyn Classifier>);
    let source = FixedLandmarkSource::zeroed();

    for _ in 0..SEQUENCE_LENGTH {
        h.pipeline.tick(&source).await;
    }

    assert!(h.sink.is_empty());
    assert_eq!(
        h.decisions.try_recv().unwrap(),
        Decision::Rejected(RejectReason::InferenceFailed {
            code: InferenceErrorCodes::BACKEND_FAILED
        })
    );

    // The loop survives and keeps accumulating
    assert_eq!(h.pipeline.state(), SessionState::Capturing);
    h.pipeline.tick(&source).await;
    assert_eq!(h.pipeline.buffer_status().current, 1);
}

#[tokio::test]
async fn test_consecutive_windows_emit_consecutive_results() {
    let classifier = Arc::new(FixedOutcomeClassifier::new(9, 0.9, 11));
    let mut h = harness(Arc::clone(&classifier) as Arc<dyn Classifier>);
    let source = FixedLandmarkSource::zeroed();

    for _ in 0..3 * SEQUENCE_LENGTH {
        h.pipeline.tick(&source).await;
    }

    assert_eq!(classifier.calls(), 3);
    let results = h.sink.results();
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.gesture.name == "A"));
    // StubTimeSource guarantees distinct timestamps, hence distinct ids
    assert_ne!(results[0].id, results[1].id);
}

#[tokio::test]
async fn test_tick_while_awaiting_inference_skips_sampling() {
    let classifier = Arc::new(FixedOutcomeClassifier::new(0, 0.95, 11));
    let mut h = harness(classifier as Arc<dyn Classifier>);
    let source = FixedLandmarkSource::zeroed();

    h.pipeline.state.set(SessionState::AwaitingInference);
    h.pipeline.tick(&source).await;

    assert_eq!(source.samples_served(), 0);
    assert_eq!(h.pipeline.buffer_status().current, 0);
}

#[tokio::test]
async fn test_shutdown_clears_buffer_and_goes_idle() {
    let classifier = Arc::new(FixedOutcomeClassifier::new(0, 0.95, 11));
    let mut h = harness(classifier as Arc<dyn Classifier>);
    let source = FixedLandmarkSource::zeroed();

    for _ in 0..10 {
        h.pipeline.tick(&source).await;
    }
    assert_eq!(h.pipeline.buffer_status().current, 10);

    h.pipeline.shutdown();
    assert_eq!(h.pipeline.state(), SessionState::Idle);
    assert_eq!(h.pipeline.buffer_status().current, 0);
}
