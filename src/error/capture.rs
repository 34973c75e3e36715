// Capture session error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Capture error code constants
///
/// These constants provide a single source of truth for error codes
/// shared with any embedding application layer.
///
/// Error code range: 1001-1005
pub struct CaptureErrorCodes {}

impl CaptureErrorCodes {
    /// A capture session is already running
    pub const ALREADY_RUNNING: i32 = 1001;

    /// No capture session is running
    pub const NOT_RUNNING: i32 = 1002;

    /// Mutex/RwLock was poisoned
    pub const LOCK_POISONED: i32 = 1003;

    /// Result or status channel disconnected unexpectedly
    pub const CHANNEL_CLOSED: i32 = 1004;

    /// Confidence threshold is not a number in [0, 1]
    pub const THRESHOLD_INVALID: i32 = 1005;
}

/// Log a capture error with structured context
///
/// Logs with the error code, component, and message so failures can be
/// correlated programmatically. Non-blocking; never panics.
pub fn log_capture_error(err: &CaptureError, context: &str) {
    error!(
        "Capture error in {}: code={}, component=CaptureSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Capture-session related errors
///
/// These errors cover session lifecycle operations: starting, stopping,
/// and channel plumbing. Error code range: 1001-1005.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// A capture session is already running
    AlreadyRunning,

    /// No capture session is running
    NotRunning,

    /// Mutex/RwLock was poisoned
    LockPoisoned { component: String },

    /// Result or status channel disconnected unexpectedly
    ChannelClosed { reason: String },

    /// Confidence threshold is not a number in [0, 1]
    ThresholdInvalid { value: f32 },
}

impl ErrorCode for CaptureError {
    fn code(&self) -> i32 {
        match self {
            CaptureError::AlreadyRunning => CaptureErrorCodes::ALREADY_RUNNING,
            CaptureError::NotRunning => CaptureErrorCodes::NOT_RUNNING,
            CaptureError::LockPoisoned { .. } => CaptureErrorCodes::LOCK_POISONED,
            CaptureError::ChannelClosed { .. } => CaptureErrorCodes::CHANNEL_CLOSED,
            CaptureError::ThresholdInvalid { .. } => CaptureErrorCodes::THRESHOLD_INVALID,
        }
    }

    fn message(&self) -> String {
        match self {
            CaptureError::AlreadyRunning => {
                "Capture session already running. Call stop_capture() first.".to_string()
            }
            CaptureError::NotRunning => {
                "No capture session running. Call start_capture() first.".to_string()
            }
            CaptureError::LockPoisoned { component } => {
                format!("Lock poisoned in component: {}", component)
            }
            CaptureError::ChannelClosed { reason } => {
                format!("Channel closed unexpectedly: {}", reason)
            }
            CaptureError::ThresholdInvalid { value } => {
                format!("Confidence threshold must be in [0, 1], got {}", value)
            }
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

impl std::error::Error for CaptureError {}
