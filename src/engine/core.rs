//! TranslatorHandle: reusable capture/recognition orchestration layer.
//!
//! This struct composes the gesture catalog, the classifier port, the
//! broadcast channels, and the active capture session behind one handle
//! shared across CLI and app entry points. Singleton-free by design:
//! everything the pipeline needs is owned here and passed down by Arc.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};

use crate::capture::{
    BroadcastSink, CaptureSession, LandmarkSource, ResultSink, SessionState,
};
use crate::capture::session::PipelineContext;
use crate::catalog::GestureCatalog;
use crate::config::AppConfig;
use crate::engine::time::{SystemTimeSource, TimeSource};
use crate::error::CaptureError;
use crate::managers::BroadcastChannelManager;
use crate::recognition::{BufferStatus, Classifier, PlaceholderClassifier, TranslationResult};

/// Telemetry event emitted by the engine core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    pub timestamp_ms: u64,
    pub kind: TelemetryEventKind,
    pub detail: Option<String>,
}

/// Types of telemetry events supported by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TelemetryEventKind {
    CaptureStarted { session_id: String },
    CaptureStopped { session_id: String },
    ThresholdChanged { threshold: f32 },
    Warning,
}

/// TranslatorHandle orchestrates the capture pipeline and shared channels.
pub struct TranslatorHandle {
    config: Arc<RwLock<AppConfig>>,
    catalog: Arc<GestureCatalog>,
    classifier: Arc<dyn Classifier>,
    broadcasts: BroadcastChannelManager,
    telemetry_tx: broadcast::Sender<TelemetryEvent>,
    time_source: Arc<dyn TimeSource>,
    session: Mutex<Option<CaptureSession>>,
}

impl TranslatorHandle {
    /// Create a handle with defaults: file-backed config, the built-in
    /// gesture catalog, and the placeholder classifier sized to it.
    pub fn new() -> Self {
        let catalog = Arc::new(GestureCatalog::builtin());
        let classifier: Arc<dyn Classifier> =
            Arc::new(PlaceholderClassifier::new(catalog.len()));
        Self::with_parts(
            AppConfig::load(),
            catalog,
            classifier,
            Arc::new(SystemTimeSource::default()),
        )
    }

    /// Create a handle from explicit parts (custom model, catalog, clock)
    pub fn with_parts(
        config: AppConfig,
        catalog: Arc<GestureCatalog>,
        classifier: Arc<dyn Classifier>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        if catalog.len() != classifier.num_classes() {
            // Mismatches don't crash lookups (the gate rejects unknown
            // indices) but they do mean some classes can never surface.
            log::warn!(
                "[TranslatorHandle] catalog has {} entries but classifier emits {} classes",
                catalog.len(),
                classifier.num_classes()
            );
        }
        let (telemetry_tx, _) = broadcast::channel(128);
        Self {
            config: Arc::new(RwLock::new(config.validated())),
            catalog,
            classifier,
            broadcasts: BroadcastChannelManager::new(),
            telemetry_tx,
            time_source,
            session: Mutex::new(None),
        }
    }

    fn emit_event(&self, kind: TelemetryEventKind, detail: Option<String>) {
        let _ = self.telemetry_tx.send(TelemetryEvent {
            timestamp_ms: self.time_source.now_ms(),
            kind,
            detail,
        });
    }

    // ========================================================================
    // CAPTURE LIFECYCLE
    // ========================================================================

    /// Start a capture session fed by the given landmark source
    ///
    /// Accepted results fan out on the results broadcast channel. Returns
    /// the fresh session id, or AlreadyRunning if a session is active.
    pub async fn start_capture(
        &self,
        source: Arc<dyn LandmarkSource>,
    ) -> Result<String, CaptureError> {
        let results_tx = self.broadcasts.init_results();
        let sink: Arc<dyn ResultSink> = Arc::new(BroadcastSink::new(results_tx));
        self.start_capture_with_sink(source, sink).await
    }

    /// Start a capture session routing accepted results to a custom sink
    ///
    /// The sink is called exactly once per accepted decision; the debug
    /// decisions channel still carries every decision.
    pub async fn start_capture_with_sink(
        &self,
        source: Arc<dyn LandmarkSource>,
        sink: Arc<dyn ResultSink>,
    ) -> Result<String, CaptureError> {
        let mut guard = self.session.lock().await;
        if guard.is_some() {
            return Err(CaptureError::AlreadyRunning);
        }

        let session_id = format!("session_{}", self.time_source.now_ms());
        let ctx = PipelineContext {
            config: Arc::clone(&self.config),
            catalog: Arc::clone(&self.catalog),
            classifier: Arc::clone(&self.classifier),
            time_source: Arc::clone(&self.time_source),
            sink,
            decision_tx: self.broadcasts.init_decisions(),
        };

        *guard = Some(CaptureSession::spawn(ctx, source, session_id.clone()));
        self.emit_event(
            TelemetryEventKind::CaptureStarted {
                session_id: session_id.clone(),
            },
            None,
        );
        Ok(session_id)
    }

    /// Stop the active capture session
    ///
    /// Joins the session worker: when this returns the state is Idle, the
    /// window is empty, and any in-flight inference has been discarded.
    pub async fn stop_capture(&self) -> Result<(), CaptureError> {
        let mut guard = self.session.lock().await;
        match guard.take() {
            Some(mut session) => {
                session.stop().await;
                self.emit_event(
                    TelemetryEventKind::CaptureStopped {
                        session_id: session.session_id().to_string(),
                    },
                    None,
                );
                Ok(())
            }
            None => Err(CaptureError::NotRunning),
        }
    }

    /// Current session state (Idle when no session is active)
    pub async fn session_state(&self) -> SessionState {
        match self.session.lock().await.as_ref() {
            Some(session) => session.state(),
            None => SessionState::Idle,
        }
    }

    /// Latest window fill status for the active session
    pub async fn buffer_status(&self) -> BufferStatus {
        match self.session.lock().await.as_ref() {
            Some(session) => session.buffer_status(),
            None => BufferStatus::empty(),
        }
    }

    // ========================================================================
    // SETTINGS
    // ========================================================================

    /// Update the confidence threshold, clamped to [0, 1]
    ///
    /// Takes effect on the next decision; no session restart needed.
    pub fn set_confidence_threshold(&self, threshold: f32) -> Result<(), CaptureError> {
        if threshold.is_nan() {
            return Err(CaptureError::ThresholdInvalid { value: threshold });
        }
        let clamped = threshold.clamp(0.0, 1.0);
        let mut config = self.config.write().map_err(|_| CaptureError::LockPoisoned {
            component: "config".to_string(),
        })?;
        config.recognition.confidence_threshold = clamped;
        drop(config);
        self.emit_event(
            TelemetryEventKind::ThresholdChanged { threshold: clamped },
            None,
        );
        Ok(())
    }

    /// Current confidence threshold
    pub fn confidence_threshold(&self) -> f32 {
        match self.config.read() {
            Ok(config) => config.recognition.confidence_threshold,
            Err(_) => AppConfig::default().recognition.confidence_threshold,
        }
    }

    /// Clone of the current configuration
    pub fn config_snapshot(&self) -> AppConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(_) => AppConfig::default(),
        }
    }

    /// The gesture catalog backing the decision gate
    pub fn catalog(&self) -> &GestureCatalog {
        &self.catalog
    }

    // ========================================================================
    // STREAMS
    // ========================================================================

    /// Subscribe to accepted translation results
    ///
    /// Returns None until a session has started with the broadcast sink.
    pub fn subscribe_results(&self) -> Option<broadcast::Receiver<TranslationResult>> {
        self.broadcasts.subscribe_results()
    }

    /// Subscribe to all gate decisions, accepted and rejected (debug)
    pub fn subscribe_decisions(
        &self,
    ) -> Option<broadcast::Receiver<crate::recognition::Decision>> {
        self.broadcasts.subscribe_decisions()
    }

    /// Subscribe to engine telemetry events
    pub fn subscribe_telemetry(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.telemetry_tx.subscribe()
    }

    /// Stream of accepted results, dropping lagged entries
    pub fn results_stream(
        &self,
    ) -> Option<impl futures::Stream<Item = TranslationResult>> {
        use futures::StreamExt;
        use tokio_stream::wrappers::BroadcastStream;
        self.subscribe_results()
            .map(|rx| BroadcastStream::new(rx).filter_map(|item| async move { item.ok() }))
    }
}

impl Default for TranslatorHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
