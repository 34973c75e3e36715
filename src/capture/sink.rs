// Result sink port - receiver of finalized translation results
//
// The external history/speech collaborators sit behind this trait. The
// pipeline calls accept() exactly once per accepted decision and never
// for rejections.

use std::sync::Mutex;

use tokio::sync::broadcast;

use crate::recognition::TranslationResult;

/// Receiver of accepted translation results
pub trait ResultSink: Send + Sync {
    /// Accept one finalized result. Called exactly once per accepted
    /// decision; implementations must not block the capture tick.
    fn accept(&self, result: TranslationResult);
}

/// Sink fanning results out on a tokio broadcast channel
///
/// Send failures mean no subscriber is currently listening; results are
/// dropped silently in that case, matching broadcast semantics elsewhere
/// in the crate.
pub struct BroadcastSink {
    tx: broadcast::Sender<TranslationResult>,
}

impl BroadcastSink {
    pub fn new(tx: broadcast::Sender<TranslationResult>) -> Self {
        Self { tx }
    }
}

impl ResultSink for BroadcastSink {
    fn accept(&self, result: TranslationResult) {
        let _ = self.tx.send(result);
    }
}

/// In-memory sink collecting results for inspection in tests and tooling
#[derive(Debug, Default)]
pub struct MemorySink {
    results: Mutex<Vec<TranslationResult>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all accepted results so far
    pub fn results(&self) -> Vec<TranslationResult> {
        self.results.lock().expect("results poisoned").clone()
    }

    /// Number of accepted results so far
    pub fn len(&self) -> usize {
        self.results.lock().expect("results poisoned").len()
    }

    /// True when no results have been accepted
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultSink for MemorySink {
    fn accept(&self, result: TranslationResult) {
        self.results.lock().expect("results poisoned").push(result);
    }
}
