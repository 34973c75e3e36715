// BroadcastChannelManager: Centralized tokio broadcast channel management
// Single Responsibility: Broadcast channel lifecycle and subscription

use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::recognition::{Decision, TranslationResult};

/// Manages all tokio broadcast channels
///
/// Centralizes channel creation, storage, and subscription handling so
/// the engine handle doesn't carry a sender field per stream.
///
/// # Channel Types
/// - Results: accepted translation results for the UI/history surfaces
/// - Decisions: every gate decision, accepted and rejected (debug only)
pub struct BroadcastChannelManager {
    results: Arc<Mutex<Option<broadcast::Sender<TranslationResult>>>>,
    decisions: Arc<Mutex<Option<broadcast::Sender<Decision>>>>,
}

impl BroadcastChannelManager {
    /// Create a manager with all channels uninitialized
    ///
    /// Channels are initialized lazily when a capture session starts.
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(None)),
            decisions: Arc::new(Mutex::new(None)),
        }
    }

    /// Initialize the results broadcast channel
    ///
    /// Returns the sender the capture session publishes accepted results
    /// on. Buffer size 100: results arrive at most once per full window
    /// (3 seconds at the default cadence), so lagging is unlikely.
    pub fn init_results(&self) -> broadcast::Sender<TranslationResult> {
        let (tx, _) = broadcast::channel(100);
        *self.results.lock().expect("results channel poisoned") = Some(tx.clone());
        tx
    }

    /// Subscribe to accepted translation results
    ///
    /// Returns None if no capture session has initialized the channel yet.
    /// Each subscriber receives an independent copy of every result.
    pub fn subscribe_results(&self) -> Option<broadcast::Receiver<TranslationResult>> {
        self.results
            .lock()
            .expect("results channel poisoned")
            .as_ref()
            .map(|tx| tx.subscribe())
    }

    /// Initialize the decisions broadcast channel (debug)
    ///
    /// Carries every gate decision including silent rejections, for debug
    /// UI and tooling; the user-facing surface only ever sees results.
    pub fn init_decisions(&self) -> broadcast::Sender<Decision> {
        let (tx, _) = broadcast::channel(100);
        *self.decisions.lock().expect("decisions channel poisoned") = Some(tx.clone());
        tx
    }

    /// Subscribe to gate decisions (debug)
    ///
    /// Returns None if no capture session has initialized the channel yet.
    pub fn subscribe_decisions(&self) -> Option<broadcast::Receiver<Decision>> {
        self.decisions
            .lock()
            .expect("decisions channel poisoned")
            .as_ref()
            .map(|tx| tx.subscribe())
    }
}

impl Default for BroadcastChannelManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_before_init_returns_none() {
        let manager = BroadcastChannelManager::new();
        assert!(manager.subscribe_results().is_none());
        assert!(manager.subscribe_decisions().is_none());
    }

    #[test]
    fn test_subscribe_after_init() {
        let manager = BroadcastChannelManager::new();
        let _tx = manager.init_results();
        assert!(manager.subscribe_results().is_some());
    }
}
