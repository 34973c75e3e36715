//! Engine layer: orchestration handle and time source abstraction.

pub mod core;
pub mod time;

pub use self::core::{TelemetryEvent, TelemetryEventKind, TranslatorHandle};
pub use time::{StubTimeSource, SystemTimeSource, TimeSource};
