// Test support - deterministic classifier stubs
//
// Deterministic stand-ins for the classifier port, used by unit tests,
// the integration scenarios, and the CLI harness. Kept in the library
// (not behind cfg(test)) so integration tests and tooling share them.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::InferenceError;
use crate::recognition::window::SEQUENCE_LENGTH;
use crate::recognition::{ClassificationOutcome, Classifier, FeatureVector};

/// Classifier that always returns the same outcome, counting invocations
pub struct FixedOutcomeClassifier {
    outcome: ClassificationOutcome,
    num_classes: usize,
    calls: AtomicU64,
}

impl FixedOutcomeClassifier {
    pub fn new(class_index: usize, confidence: f32, num_classes: usize) -> Self {
        Self {
            outcome: ClassificationOutcome {
                class_index,
                confidence,
            },
            num_classes,
            calls: AtomicU64::new(0),
        }
    }

    /// Number of predict() calls so far
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for FixedOutcomeClassifier {
    async fn predict(
        &self,
        sequence: &[FeatureVector],
    ) -> Result<ClassificationOutcome, InferenceError> {
        assert_eq!(sequence.len(), SEQUENCE_LENGTH);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome)
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}

/// Classifier that always fails with the given error
pub struct FailingClassifier {
    error: InferenceError,
    num_classes: usize,
}

impl FailingClassifier {
    pub fn new(error: InferenceError, num_classes: usize) -> Self {
        Self { error, num_classes }
    }
}

#[async_trait]
impl Classifier for FailingClassifier {
    async fn predict(
        &self,
        sequence: &[FeatureVector],
    ) -> Result<ClassificationOutcome, InferenceError> {
        assert_eq!(sequence.len(), SEQUENCE_LENGTH);
        Err(self.error.clone())
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}

/// Classifier that sleeps before answering, for late-response scenarios
pub struct SlowClassifier {
    delay: Duration,
    outcome: ClassificationOutcome,
    num_classes: usize,
    calls: AtomicU64,
    completions: AtomicU64,
}

impl SlowClassifier {
    pub fn new(delay: Duration, class_index: usize, confidence: f32, num_classes: usize) -> Self {
        Self {
            delay,
            outcome: ClassificationOutcome {
                class_index,
                confidence,
            },
            num_classes,
            calls: AtomicU64::new(0),
            completions: AtomicU64::new(0),
        }
    }

    /// Number of predict() calls started
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of predict() calls that ran to completion (not cancelled)
    pub fn completions(&self) -> u64 {
        self.completions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for SlowClassifier {
    async fn predict(
        &self,
        sequence: &[FeatureVector],
    ) -> Result<ClassificationOutcome, InferenceError> {
        assert_eq!(sequence.len(), SEQUENCE_LENGTH);
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.completions.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome)
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}
