// Capture module - tick-driven landmark acquisition and session control
//
// Owns the driving control structure of the translator: a periodic timer
// pulls landmark samples from the external tracking collaborator, feeds
// them through the recognition pipeline, and routes accepted results to
// the result sink. One logical capture session exists per active screen;
// the session's buffer and state machine are confined to a single task,
// so no locks guard the pipeline itself.

pub mod session;
pub mod sink;
pub mod source;

pub use session::{CaptureSession, GesturePipeline, SessionState};
pub use sink::{BroadcastSink, MemorySink, ResultSink};
pub use source::{FixedLandmarkSource, LandmarkSource, SyntheticLandmarkSource};
