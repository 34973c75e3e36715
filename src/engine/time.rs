//! Time source abstraction for result timestamps and telemetry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait representing the clock used for result timestamps and telemetry.
///
/// Timestamps are milliseconds since the Unix epoch so result identifiers
/// match the `result_<millis>` convention of the persisted history format.
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Default time source backed by the system clock.
#[derive(Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Deterministic time source for tests and CLI runs.
///
/// Each call to `now_ms()` advances by a fixed step to guarantee strictly
/// monotonic, reproducible timestamps without a real clock.
pub struct StubTimeSource {
    base_ms: u64,
    step_ms: u64,
    calls: AtomicU64,
}

impl StubTimeSource {
    pub fn new(base_ms: u64, step_ms: u64) -> Self {
        Self {
            base_ms,
            step_ms,
            calls: AtomicU64::new(0),
        }
    }
}

impl Default for StubTimeSource {
    fn default() -> Self {
        Self::new(1_000, 100)
    }
}

impl TimeSource for StubTimeSource {
    fn now_ms(&self) -> u64 {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.base_ms + n * self.step_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_time_source_advances_monotonically() {
        let clock = StubTimeSource::new(1_000, 100);
        assert_eq!(clock.now_ms(), 1_000);
        assert_eq!(clock.now_ms(), 1_100);
        assert_eq!(clock.now_ms(), 1_200);
    }

    #[test]
    fn test_system_time_source_is_nonzero() {
        let clock = SystemTimeSource::default();
        assert!(clock.now_ms() > 0);
    }
}
