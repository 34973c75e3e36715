// Recognition module - gesture classification pipeline
//
// This module holds the algorithmic core of the translator: feature
// extraction from landmark samples, the fixed-size window buffer, the
// abstract classifier port, and the confidence-gated decision step.
//
// Pipeline: LandmarkSample -> FeatureExtractor -> FeatureVector ->
// WindowBuffer -> (when full) Classifier -> ClassificationOutcome ->
// DecisionGate -> TranslationResult or rejection.

use serde::{Deserialize, Serialize};

pub mod classifier;
pub mod decision;
pub mod features;
pub mod window;

pub use classifier::{Classifier, PlaceholderClassifier};
pub use decision::{Decision, DecisionGate, RejectReason, TranslationResult};
pub use features::{FeatureExtractor, FeatureVector, TOTAL_FEATURES};
pub use window::{BufferMode, BufferStatus, WindowBuffer, SEQUENCE_LENGTH};

/// Raw classifier output for one window
///
/// Produced once per completed inference call and consumed exactly once
/// by the decision gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutcome {
    /// Integer identifying which gesture the model believes was observed
    pub class_index: usize,
    /// Model probability for that class, in [0, 1]
    pub confidence: f32,
}
