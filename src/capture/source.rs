// Landmark source port - pull-based supplier of per-tick samples
//
// The capture loop requests one sample per tick; the source returns
// whatever the tracker currently sees. Sources must tolerate being asked
// faster or slower than the tracker updates and may return sparse or
// empty regions without that being an error.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::landmarks::{LandmarkSample, FACE_POINTS, HAND_POINTS, POSE_POINTS};

/// Pull-based supplier of landmark samples
///
/// A production implementation wraps the camera + pose-estimation stack;
/// the implementations here generate synthetic data for development and
/// tests.
pub trait LandmarkSource: Send + Sync {
    /// Return the current landmark sample
    fn next_sample(&self) -> LandmarkSample;
}

/// Synthetic source producing fully-populated random landmarks
///
/// Stands in for the camera/tracker collaborator during development.
#[derive(Debug, Default)]
pub struct SyntheticLandmarkSource;

impl SyntheticLandmarkSource {
    pub fn new() -> Self {
        Self
    }
}

impl LandmarkSource for SyntheticLandmarkSource {
    fn next_sample(&self) -> LandmarkSample {
        let mut rng = rand::thread_rng();
        let mut random_region = |count: usize| -> Vec<[f32; 3]> {
            (0..count)
                .map(|_| [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()])
                .collect()
        };
        LandmarkSample {
            face: random_region(FACE_POINTS),
            pose: random_region(POSE_POINTS),
            left_hand: random_region(HAND_POINTS),
            right_hand: random_region(HAND_POINTS),
        }
    }
}

/// Source that always returns the same sample, counting how often it is
/// polled. Used by tests to verify tick cadence and stop behavior.
#[derive(Debug)]
pub struct FixedLandmarkSource {
    sample: LandmarkSample,
    served: AtomicU64,
}

impl FixedLandmarkSource {
    pub fn new(sample: LandmarkSample) -> Self {
        Self {
            sample,
            served: AtomicU64::new(0),
        }
    }

    /// Source returning all-zero, fully-populated landmarks
    pub fn zeroed() -> Self {
        Self::new(LandmarkSample::filled_with([0.0, 0.0, 0.0]))
    }

    /// Number of samples served so far
    pub fn samples_served(&self) -> u64 {
        self.served.load(Ordering::SeqCst)
    }
}

impl LandmarkSource for FixedLandmarkSource {
    fn next_sample(&self) -> LandmarkSample {
        self.served.fetch_add(1, Ordering::SeqCst);
        self.sample.clone()
    }
}
