// LandmarkSample - one tracker frame of multi-region body landmarks
//
// Each region carries (x, y, z) points in tracker coordinate space. Regions
// the tracker failed to detect on a given frame arrive as empty vectors;
// downstream feature extraction pads for them.

use serde::{Deserialize, Serialize};

/// Face mesh point count when fully detected
pub const FACE_POINTS: usize = 468;
/// Pose skeleton point count when fully detected
pub const POSE_POINTS: usize = 33;
/// Per-hand point count when fully detected
pub const HAND_POINTS: usize = 21;

/// One frame of landmark data across all tracked regions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkSample {
    pub face: Vec<[f32; 3]>,
    pub pose: Vec<[f32; 3]>,
    pub left_hand: Vec<[f32; 3]>,
    pub right_hand: Vec<[f32; 3]>,
}

impl LandmarkSample {
    /// A frame on which the tracker detected nothing
    pub fn empty() -> Self {
        Self {
            face: Vec::new(),
            pose: Vec::new(),
            left_hand: Vec::new(),
            right_hand: Vec::new(),
        }
    }

    /// A fully detected frame with every point set to the same coordinate
    pub fn filled_with(point: [f32; 3]) -> Self {
        Self {
            face: vec![point; FACE_POINTS],
            pose: vec![point; POSE_POINTS],
            left_hand: vec![point; HAND_POINTS],
            right_hand: vec![point; HAND_POINTS],
        }
    }

    /// True when no region carries any points
    pub fn is_empty(&self) -> bool {
        self.face.is_empty()
            && self.pose.is_empty()
            && self.left_hand.is_empty()
            && self.right_hand.is_empty()
    }

    /// Total point count across all regions
    pub fn point_count(&self) -> usize {
        self.face.len() + self.pose.len() + self.left_hand.len() + self.right_hand.len()
    }
}

impl Default for LandmarkSample {
    fn default() -> Self {
        Self::empty()
    }
}
