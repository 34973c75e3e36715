// DecisionGate - confidence-gated acceptance of classifier outcomes
//
// Applies the user's confidence threshold and resolves the class index
// against the gesture catalog. Only accepted decisions surface a
// TranslationResult; rejections are silent to the user but carried on a
// debug channel and logged. Both outcomes direct the capture loop to
// clear the window so a stale window is never re-classified.

use serde::{Deserialize, Serialize};

use crate::catalog::{GestureCatalog, GestureEntry};

use super::ClassificationOutcome;

/// Finalized, user-facing classification result
///
/// Created on acceptance and handed to the external history/speech
/// collaborators; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Fresh identifier, unique per accepted decision
    pub id: String,
    /// The recognized gesture (catalog entry for the winning class index)
    pub gesture: GestureEntry,
    /// Classifier confidence for the accepted class, in [0, 1]
    pub confidence_score: f32,
    /// Milliseconds since the Unix epoch at acceptance time
    pub timestamp_ms: u64,
    /// Capture session that produced this result
    pub session_id: String,
}

/// Why an outcome was rejected
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectReason {
    /// Confidence fell below the configured threshold
    LowConfidence { confidence: f32, threshold: f32 },
    /// The class index does not resolve in the gesture catalog
    UnknownClass { class_index: usize },
    /// Inference itself failed; the error code identifies the cause
    InferenceFailed { code: i32 },
}

/// Outcome of gating one classification
///
/// Either way the caller must clear the window buffer before resuming:
/// re-classifying the same frames would re-emit (accepted) or flicker
/// near-duplicate detections (rejected).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    Accepted(TranslationResult),
    Rejected(RejectReason),
}

impl Decision {
    /// True for the accepted variant
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted(_))
    }
}

/// Maps classifier outcomes to accepted results or silent rejections
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionGate;

impl DecisionGate {
    pub fn new() -> Self {
        Self
    }

    /// Gate one classification outcome
    ///
    /// Accepts iff `confidence >= threshold` (the boundary case is an
    /// accept) AND the catalog resolves the class index. The timestamp is
    /// caller-supplied so a single time source governs the whole session.
    pub fn decide(
        &self,
        outcome: ClassificationOutcome,
        threshold: f32,
        catalog: &GestureCatalog,
        session_id: &str,
        timestamp_ms: u64,
    ) -> Decision {
        if outcome.confidence < threshold {
            log::debug!(
                "[DecisionGate] rejected: confidence {:.3} below threshold {:.3}",
                outcome.confidence,
                threshold
            );
            return Decision::Rejected(RejectReason::LowConfidence {
                confidence: outcome.confidence,
                threshold,
            });
        }

        match catalog.get(outcome.class_index) {
            Some(gesture) => {
                log::info!(
                    "[DecisionGate] accepted gesture '{}' (class {}, confidence {:.3})",
                    gesture.name,
                    outcome.class_index,
                    outcome.confidence
                );
                Decision::Accepted(TranslationResult {
                    id: format!("result_{}", timestamp_ms),
                    gesture: gesture.clone(),
                    confidence_score: outcome.confidence,
                    timestamp_ms,
                    session_id: session_id.to_string(),
                })
            }
            None => {
                log::warn!(
                    "[DecisionGate] rejected: class index {} not in catalog ({} classes)",
                    outcome.class_index,
                    catalog.len()
                );
                Decision::Rejected(RejectReason::UnknownClass {
                    class_index: outcome.class_index,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(class_index: usize, confidence: f32) -> ClassificationOutcome {
        ClassificationOutcome {
            class_index,
            confidence,
        }
    }

    #[test]
    fn test_accepts_above_threshold() {
        let gate = DecisionGate::new();
        let catalog = GestureCatalog::builtin();
        let decision = gate.decide(outcome(0, 0.95), 0.7, &catalog, "session_1", 1000);
        match decision {
            Decision::Accepted(result) => {
                assert_eq!(result.gesture.name, "1");
                assert!((result.confidence_score - 0.95).abs() < f32::EPSILON);
                assert_eq!(result.session_id, "session_1");
                assert_eq!(result.id, "result_1000");
                assert_eq!(result.timestamp_ms, 1000);
            }
            Decision::Rejected(reason) => panic!("expected accept, got {:?}", reason),
        }
    }

    #[test]
    fn test_boundary_confidence_equal_to_threshold_accepts() {
        let gate = DecisionGate::new();
        let catalog = GestureCatalog::builtin();
        let decision = gate.decide(outcome(3, 0.7), 0.7, &catalog, "s", 1);
        assert!(decision.is_accepted());
    }

    #[test]
    fn test_confidence_just_below_threshold_rejects() {
        let gate = DecisionGate::new();
        let catalog = GestureCatalog::builtin();
        let epsilon = 1e-6;
        let decision = gate.decide(outcome(3, 0.7 - epsilon), 0.7, &catalog, "s", 1);
        match decision {
            Decision::Rejected(RejectReason::LowConfidence { threshold, .. }) => {
                assert!((threshold - 0.7).abs() < f32::EPSILON);
            }
            other => panic!("expected low-confidence reject, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_class_rejects_even_with_high_confidence() {
        let gate = DecisionGate::new();
        let catalog = GestureCatalog::builtin();
        let decision = gate.decide(outcome(99, 0.99), 0.7, &catalog, "s", 1);
        assert_eq!(
            decision,
            Decision::Rejected(RejectReason::UnknownClass { class_index: 99 })
        );
    }

    #[test]
    fn test_low_confidence_checked_before_catalog() {
        let gate = DecisionGate::new();
        let catalog = GestureCatalog::builtin();
        // Both conditions fail; the confidence gate reports first
        let decision = gate.decide(outcome(99, 0.1), 0.7, &catalog, "s", 1);
        assert!(matches!(
            decision,
            Decision::Rejected(RejectReason::LowConfidence { .. })
        ));
    }

    #[test]
    fn test_zero_threshold_accepts_any_confidence() {
        let gate = DecisionGate::new();
        let catalog = GestureCatalog::builtin();
        let decision = gate.decide(outcome(10, 0.0), 0.0, &catalog, "s", 1);
        assert!(decision.is_accepted());
    }
}
