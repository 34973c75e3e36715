// WindowBuffer - bounded, time-ordered sequence of feature vectors
//
// The classifier consumes fixed-size windows of SEQUENCE_LENGTH feature
// vectors. Two buffering policies are supported; the policy is an explicit
// mode rather than an implicit choice:
//
// - Sliding: a keep-most-recent-N buffer. Appending to a full window
//   evicts the oldest vector, so the window stays warm and overlapping
//   windows can be classified back to back.
// - Batch: discrete windows. The buffer fills to SEQUENCE_LENGTH, is
//   consumed, and is cleared in bulk before the next window starts;
//   appends to a full batch window are dropped until the clear.
//
// The active mode comes from CaptureConfig.buffer_mode (default: sliding).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;

/// Number of feature vectors submitted to the classifier per window
pub const SEQUENCE_LENGTH: usize = 30;

/// Window buffering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferMode {
    /// Continuous overlap: evict the oldest frame once full
    Sliding,
    /// Discrete windows: drop appends once full, clear in bulk after use
    Batch,
}

/// Fill-state snapshot for UI progress display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BufferStatus {
    /// Frames currently buffered
    pub current: usize,
    /// Frames required for a full window
    pub required: usize,
    /// Fill percentage, clamped to [0, 100]
    pub percentage: f32,
}

impl BufferStatus {
    /// Status of an empty buffer
    pub fn empty() -> Self {
        Self {
            current: 0,
            required: SEQUENCE_LENGTH,
            percentage: 0.0,
        }
    }
}

/// Bounded FIFO of the most recent feature vectors for one capture session
///
/// Owned exclusively by the session's pipeline; all operations are
/// synchronous and touch only internal state. The in-flight flag prevents
/// a second inference from being started on the same window while one is
/// still pending.
#[derive(Debug)]
pub struct WindowBuffer {
    frames: VecDeque<FeatureVector>,
    mode: BufferMode,
    inference_in_flight: bool,
}

impl WindowBuffer {
    pub fn new(mode: BufferMode) -> Self {
        Self {
            frames: VecDeque::with_capacity(SEQUENCE_LENGTH),
            mode,
            inference_in_flight: false,
        }
    }

    /// Active buffering policy
    pub fn mode(&self) -> BufferMode {
        self.mode
    }

    /// Append a feature vector to the tail
    ///
    /// In sliding mode a full window evicts its head first; in batch mode
    /// appends to a full window are dropped until [clear] runs. Either way
    /// the window never exceeds SEQUENCE_LENGTH entries.
    pub fn append(&mut self, vector: FeatureVector) {
        if self.frames.len() == SEQUENCE_LENGTH {
            match self.mode {
                BufferMode::Sliding => {
                    self.frames.pop_front();
                }
                BufferMode::Batch => {
                    log::debug!(
                        "[WindowBuffer] Batch window full; dropping frame until clear"
                    );
                    return;
                }
            }
        }
        self.frames.push_back(vector);
    }

    /// Number of frames currently buffered
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no frames are buffered
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// True iff the window is full and no inference is pending on it
    pub fn is_ready(&self) -> bool {
        self.frames.len() == SEQUENCE_LENGTH && !self.inference_in_flight
    }

    /// Current fill state
    pub fn status(&self) -> BufferStatus {
        let current = self.frames.len();
        let percentage =
            (100.0 * current as f32 / SEQUENCE_LENGTH as f32).clamp(0.0, 100.0);
        BufferStatus {
            current,
            required: SEQUENCE_LENGTH,
            percentage,
        }
    }

    /// Mark an inference as pending on this window
    ///
    /// Only the capture loop may call this, and only after [is_ready]
    /// returned true; starting a second inference while one is pending is
    /// a gating bug, not a runtime condition.
    pub fn begin_inference(&mut self) {
        assert!(
            !self.inference_in_flight,
            "begin_inference called while an inference is already in flight"
        );
        self.inference_in_flight = true;
    }

    /// Mark the pending inference as resolved
    pub fn finish_inference(&mut self) {
        self.inference_in_flight = false;
    }

    /// True while an inference is pending on this window
    pub fn inference_in_flight(&self) -> bool {
        self.inference_in_flight
    }

    /// Snapshot the window contents in arrival order for the classifier
    pub fn snapshot(&self) -> Vec<FeatureVector> {
        self.frames.iter().cloned().collect()
    }

    /// Empty the buffer and reset the fill count to 0. Idempotent.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
#[path = "window_tests.rs"]
mod tests;
