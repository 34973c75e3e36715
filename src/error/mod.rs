// Error types for the ISL translator pipeline
//
// This module defines custom error types for capture and inference
// operations, providing structured error handling with stable numeric
// error codes suitable for surfacing across an app boundary.

mod capture;
mod inference;

pub use capture::{log_capture_error, CaptureError, CaptureErrorCodes};
pub use inference::{log_inference_error, InferenceError, InferenceErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// module boundaries and log output.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
