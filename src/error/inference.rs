// Inference error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Inference error code constants
///
/// Error code range: 2001-2003
pub struct InferenceErrorCodes {}

impl InferenceErrorCodes {
    /// The model backend failed to run inference
    pub const BACKEND_FAILED: i32 = 2001;

    /// Inference did not complete within its deadline
    pub const TIMEOUT: i32 = 2002;

    /// The model returned a class index outside the catalog's range
    pub const CLASS_OUT_OF_RANGE: i32 = 2003;
}

/// Log an inference error with structured context
pub fn log_inference_error(err: &InferenceError, context: &str) {
    error!(
        "Inference error in {}: code={}, component=Classifier, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Classifier/inference errors
///
/// These are runtime conditions the capture loop converts to rejected
/// decisions; they are never fatal to the loop. Error code range: 2001-2003.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    /// The model backend failed (load failure, tensor shape mismatch, ...)
    BackendFailed { details: String },

    /// Inference exceeded its deadline
    Timeout { elapsed_ms: u64 },

    /// The model emitted a class index the catalog cannot resolve
    ClassOutOfRange {
        class_index: usize,
        num_classes: usize,
    },
}

impl ErrorCode for InferenceError {
    fn code(&self) -> i32 {
        match self {
            InferenceError::BackendFailed { .. } => InferenceErrorCodes::BACKEND_FAILED,
            InferenceError::Timeout { .. } => InferenceErrorCodes::TIMEOUT,
            InferenceError::ClassOutOfRange { .. } => InferenceErrorCodes::CLASS_OUT_OF_RANGE,
        }
    }

    fn message(&self) -> String {
        match self {
            InferenceError::BackendFailed { details } => {
                format!("Model backend failed: {}", details)
            }
            InferenceError::Timeout { elapsed_ms } => {
                format!("Inference timed out after {}ms", elapsed_ms)
            }
            InferenceError::ClassOutOfRange {
                class_index,
                num_classes,
            } => {
                format!(
                    "Class index {} out of range for catalog with {} classes",
                    class_index, num_classes
                )
            }
        }
    }
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for InferenceError {}
