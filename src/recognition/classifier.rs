// Classifier port - abstract gesture classification capability
//
// The pipeline depends on an abstract predict(window) capability rather
// than a concrete model so the placeholder used during development and a
// real on-device model are interchangeable without touching the rest of
// the pipeline.
//
// Discipline (enforced by the capture loop, asserted here): predict is
// only invoked with a window of exactly SEQUENCE_LENGTH vectors, and at
// most one call is in flight per window buffer at a time.

use async_trait::async_trait;
use rand::Rng;

use crate::error::InferenceError;

use super::features::FeatureVector;
use super::window::SEQUENCE_LENGTH;
use super::ClassificationOutcome;

/// Abstract classification capability over one full window
///
/// Implementations may suspend (real backends run on-device tensor
/// inference). Violating the window-length precondition is a programmer
/// error in the caller's gating, not a recoverable condition.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify an ordered window of SEQUENCE_LENGTH feature vectors
    async fn predict(
        &self,
        sequence: &[FeatureVector],
    ) -> Result<ClassificationOutcome, InferenceError>;

    /// Number of output classes this model produces
    fn num_classes(&self) -> usize;
}

/// Development placeholder standing in for a real model
///
/// Returns a uniformly random class index and a confidence in the fixed
/// high band [0.75, 0.95), purely to exercise the pipeline end to end.
/// A production implementation replaces this with real inference while
/// preserving the same signature and in-flight discipline.
pub struct PlaceholderClassifier {
    num_classes: usize,
}

impl PlaceholderClassifier {
    /// Create a placeholder producing class indices in `0..num_classes`
    pub fn new(num_classes: usize) -> Self {
        assert!(num_classes > 0, "placeholder needs at least one class");
        Self { num_classes }
    }
}

#[async_trait]
impl Classifier for PlaceholderClassifier {
    async fn predict(
        &self,
        sequence: &[FeatureVector],
    ) -> Result<ClassificationOutcome, InferenceError> {
        assert_eq!(
            sequence.len(),
            SEQUENCE_LENGTH,
            "predict requires exactly {} frames, got {}",
            SEQUENCE_LENGTH,
            sequence.len()
        );

        let (class_index, confidence) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(0..self.num_classes),
                0.75 + rng.gen::<f32>() * 0.20,
            )
        };

        log::debug!(
            "[PlaceholderClassifier] mock inference: class={} confidence={:.3}",
            class_index,
            confidence
        );

        Ok(ClassificationOutcome {
            class_index,
            confidence,
        })
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_window() -> Vec<FeatureVector> {
        vec![FeatureVector::zeroed(); SEQUENCE_LENGTH]
    }

    #[tokio::test]
    async fn test_placeholder_outcome_in_range() {
        let classifier = PlaceholderClassifier::new(11);
        for _ in 0..50 {
            let outcome = classifier.predict(&full_window()).await.unwrap();
            assert!(outcome.class_index < 11);
            assert!((0.75..0.95).contains(&outcome.confidence));
        }
    }

    #[tokio::test]
    async fn test_placeholder_single_class() {
        let classifier = PlaceholderClassifier::new(1);
        let outcome = classifier.predict(&full_window()).await.unwrap();
        assert_eq!(outcome.class_index, 0);
    }

    #[tokio::test]
    #[should_panic(expected = "exactly 30 frames")]
    async fn test_short_window_is_fatal() {
        let classifier = PlaceholderClassifier::new(11);
        let short = vec![FeatureVector::zeroed(); SEQUENCE_LENGTH - 1];
        let _ = classifier.predict(&short).await;
    }

    #[test]
    #[should_panic(expected = "at least one class")]
    fn test_zero_classes_is_fatal() {
        let _ = PlaceholderClassifier::new(0);
    }
}
