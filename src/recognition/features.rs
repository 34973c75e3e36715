// FeatureExtractor - flattens landmark samples into fixed-width vectors
//
// The model consumes a fixed-width numeric input regardless of how many
// landmarks the tracker actually produced on a given tick. This module
// concatenates region coordinates in a fixed order and pads/truncates the
// result to exactly TOTAL_FEATURES values.
//
// Region order (must match the training pipeline): pose, face, left hand,
// right hand, each point contributing (x, y, z).

use crate::landmarks::LandmarkSample;

/// Fixed width of every feature vector fed to the classifier
///
/// 171 = pose (33 x 3 = 99) plus a truncated face/hand contribution; the
/// trained model's input layer fixes this regardless of how many points
/// each region actually supplies.
pub const TOTAL_FEATURES: usize = 171;

/// Fixed-length numeric feature vector for one landmark sample
///
/// The length invariant (exactly TOTAL_FEATURES values) is enforced by
/// construction: the only ways to obtain one are [FeatureExtractor::extract]
/// and [FeatureVector::zeroed]. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    /// All-zero vector, used for padding and tests
    pub fn zeroed() -> Self {
        Self {
            values: vec![0.0; TOTAL_FEATURES],
        }
    }

    fn from_values(values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), TOTAL_FEATURES);
        Self { values }
    }

    /// Number of features (always TOTAL_FEATURES)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API completeness alongside len()
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the feature values
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Converts one multi-region landmark sample into a fixed-length vector
///
/// Stateless and total: any well-formed LandmarkSample yields a vector,
/// with no error conditions and no side effects.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract the feature vector for one sample
    ///
    /// Coordinates are concatenated in fixed region order (pose, face,
    /// left hand, right hand). Non-finite components (NaN, infinities)
    /// are normalized to 0.0 so they never reach the model. Output is
    /// right-padded with zeros or truncated to exactly TOTAL_FEATURES.
    pub fn extract(&self, sample: &LandmarkSample) -> FeatureVector {
        let mut values = Vec::with_capacity(TOTAL_FEATURES);

        for region in [
            &sample.pose,
            &sample.face,
            &sample.left_hand,
            &sample.right_hand,
        ] {
            for point in region {
                if values.len() >= TOTAL_FEATURES {
                    break;
                }
                for &component in point {
                    values.push(sanitize(component));
                }
            }
        }

        // Truncation can silently drop trailing face/hand data when all four
        // regions are fully populated; the fixed-width input contract wins.
        values.truncate(TOTAL_FEATURES);
        values.resize(TOTAL_FEATURES, 0.0);

        FeatureVector::from_values(values)
    }
}

/// Map NaN and infinite coordinate components to 0.0
fn sanitize(component: f32) -> f32 {
    if component.is_finite() {
        component
    } else {
        0.0
    }
}
