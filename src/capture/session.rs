// CaptureSession - tick-driven state machine wrapping the pipeline
//
// State machine: Idle -> Capturing on start (buffer cleared on entry);
// Capturing -> AwaitingInference when the window fills; back to Capturing
// once the decision is made and the buffer cleared; any state -> Idle on
// stop. Stop is a hard synchronization point: the worker task is joined,
// an in-flight inference future is dropped (its late result is never
// applied), and the buffer ends empty.
//
// The deterministic per-tick logic lives in GesturePipeline so tests and
// fixture tooling can drive exactly N frames without wall-clock timers;
// CaptureSession adds the interval timer and cancellation on top.
//
// Known simplification: inference is serialized with the tick loop rather
// than overlapped with it, so a slow model delays subsequent ticks instead
// of corrupting the window.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::catalog::GestureCatalog;
use crate::config::AppConfig;
use crate::error::{log_inference_error, ErrorCode};
use crate::recognition::window::SEQUENCE_LENGTH;
use crate::recognition::{
    BufferStatus, Classifier, Decision, DecisionGate, FeatureExtractor, RejectReason, WindowBuffer,
};
use crate::engine::time::TimeSource;

use super::sink::ResultSink;
use super::source::LandmarkSource;

/// Capture session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session active
    Idle,
    /// Accumulating frames into the window
    Capturing,
    /// A classifier call is in flight for the current window
    AwaitingInference,
}

/// Lock-free session state cell shared between the worker and observers
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new(state: SessionState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub(crate) fn set(&self, state: SessionState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    pub(crate) fn get(&self) -> SessionState {
        match self.0.load(Ordering::SeqCst) {
            0 => SessionState::Idle,
            1 => SessionState::Capturing,
            _ => SessionState::AwaitingInference,
        }
    }
}

/// Everything a session needs beyond the landmark source
///
/// Bundles the shared state and channels so the session spawner doesn't
/// couple to higher-level orchestration (the engine handle builds one of
/// these per start command).
pub struct PipelineContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub catalog: Arc<GestureCatalog>,
    pub classifier: Arc<dyn Classifier>,
    pub time_source: Arc<dyn TimeSource>,
    pub sink: Arc<dyn ResultSink>,
    pub decision_tx: broadcast::Sender<Decision>,
}

/// Deterministic core of the capture loop
///
/// Processes one landmark sample per [tick]: extract features, append to
/// the window, publish fill status, and classify + decide when the window
/// is ready. Owns the window exclusively; no internal locking.
pub struct GesturePipeline {
    extractor: FeatureExtractor,
    window: WindowBuffer,
    gate: DecisionGate,
    ctx: PipelineContext,
    session_id: String,
    state: Arc<StateCell>,
    status_tx: watch::Sender<BufferStatus>,
    ticks: u64,
    log_every_n_ticks: u64,
}

impl GesturePipeline {
    /// Build a pipeline for one session, with the buffer cleared on entry
    pub fn new(ctx: PipelineContext, session_id: String) -> Self {
        let (status_tx, _) = watch::channel(BufferStatus::empty());
        Self::with_channels(ctx, session_id, Arc::new(StateCell::new(SessionState::Capturing)), status_tx)
    }

    fn with_channels(
        ctx: PipelineContext,
        session_id: String,
        state: Arc<StateCell>,
        status_tx: watch::Sender<BufferStatus>,
    ) -> Self {
        let (buffer_mode, log_every_n_ticks) = match ctx.config.read() {
            Ok(config) => (config.capture.buffer_mode, config.capture.log_every_n_ticks),
            Err(_) => {
                log::error!("[GesturePipeline] Config lock poisoned, using defaults");
                let defaults = AppConfig::default();
                (defaults.capture.buffer_mode, defaults.capture.log_every_n_ticks)
            }
        };
        state.set(SessionState::Capturing);
        Self {
            extractor: FeatureExtractor::new(),
            window: WindowBuffer::new(buffer_mode),
            gate: DecisionGate::new(),
            ctx,
            session_id,
            state,
            status_tx,
            ticks: 0,
            log_every_n_ticks,
        }
    }

    /// Session identifier stamped on every accepted result
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Current window fill status
    pub fn buffer_status(&self) -> BufferStatus {
        self.window.status()
    }

    /// Process one capture tick
    ///
    /// Pulls a sample, extracts features, appends to the window, and runs
    /// classification + decision when the window is ready. A tick arriving
    /// while an inference is still pending skips sampling entirely rather
    /// than corrupting the window.
    pub async fn tick(&mut self, source: &dyn LandmarkSource) {
        if self.state.get() == SessionState::AwaitingInference {
            log::debug!("[GesturePipeline] tick skipped: inference in flight");
            return;
        }

        self.ticks += 1;
        let sample = source.next_sample();
        let vector = self.extractor.extract(&sample);
        self.window.append(vector);
        self.publish_status();

        if self.log_every_n_ticks > 0 && self.ticks % self.log_every_n_ticks == 0 {
            let status = self.window.status();
            log::info!(
                "[GesturePipeline] session={} ticks={} buffer={}/{} ({:.0}%)",
                self.session_id,
                self.ticks,
                status.current,
                status.required,
                status.percentage
            );
        }

        if self.window.is_ready() {
            self.classify_window().await;
        }
    }

    /// Run inference on the full window and route the outcome
    ///
    /// Inference failures (including out-of-range class indices surfaced
    /// by real backends) are logged and converted to rejections; the loop
    /// never dies here. Both accept and reject clear the window so a
    /// stale window is never re-submitted.
    async fn classify_window(&mut self) {
        self.state.set(SessionState::AwaitingInference);
        self.window.begin_inference();

        let sequence = self.window.snapshot();
        // Gating invariant: only a full window reaches the classifier
        assert_eq!(sequence.len(), SEQUENCE_LENGTH);

        let prediction = self.ctx.classifier.predict(&sequence).await;
        self.window.finish_inference();

        let decision = match prediction {
            Ok(outcome) => {
                let threshold = self.confidence_threshold();
                self.gate.decide(
                    outcome,
                    threshold,
                    &self.ctx.catalog,
                    &self.session_id,
                    self.ctx.time_source.now_ms(),
                )
            }
            Err(err) => {
                log_inference_error(&err, "classify_window");
                Decision::Rejected(RejectReason::InferenceFailed { code: err.code() })
            }
        };

        if let Decision::Accepted(result) = &decision {
            self.ctx.sink.accept(result.clone());
        }
        let _ = self.ctx.decision_tx.send(decision);

        self.window.clear();
        self.publish_status();
        self.state.set(SessionState::Capturing);
    }

    /// Clear the window and park the pipeline in Idle
    pub fn shutdown(&mut self) {
        self.window.clear();
        self.publish_status();
        self.state.set(SessionState::Idle);
        log::info!(
            "[GesturePipeline] session={} stopped after {} ticks",
            self.session_id,
            self.ticks
        );
    }

    fn confidence_threshold(&self) -> f32 {
        match self.ctx.config.read() {
            Ok(config) => config.recognition.confidence_threshold,
            Err(_) => {
                log::error!(
                    "[GesturePipeline] Config lock poisoned, using default threshold"
                );
                AppConfig::default().recognition.confidence_threshold
            }
        }
    }

    fn publish_status(&self) {
        let _ = self.status_tx.send(self.window.status());
    }
}

/// Handle to a running timer-driven capture session
///
/// Spawns a worker task that ticks the pipeline at the configured cadence
/// until [stop] is called. Dropping the handle without stopping aborts
/// the worker.
pub struct CaptureSession {
    session_id: String,
    state: Arc<StateCell>,
    status_rx: watch::Receiver<BufferStatus>,
    stop_tx: watch::Sender<bool>,
    worker: Option<JoinHandle<()>>,
}

impl CaptureSession {
    /// Start a session: spawns the tick loop on the current tokio runtime
    pub fn spawn(
        ctx: PipelineContext,
        source: Arc<dyn LandmarkSource>,
        session_id: String,
    ) -> Self {
        let tick_interval_ms = match ctx.config.read() {
            Ok(config) => config.capture.tick_interval_ms,
            Err(_) => AppConfig::default().capture.tick_interval_ms,
        };

        let state = Arc::new(StateCell::new(SessionState::Capturing));
        let (status_tx, status_rx) = watch::channel(BufferStatus::empty());
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let mut pipeline =
            GesturePipeline::with_channels(ctx, session_id.clone(), Arc::clone(&state), status_tx);

        log::info!(
            "[CaptureSession] session={} starting, tick interval {}ms",
            session_id,
            tick_interval_ms
        );

        let worker = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(tick_interval_ms));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = stop_rx.changed() => break,
                    _ = interval.tick() => {}
                }

                // Stop wins over a concurrently running tick: the tick
                // future (and any in-flight inference inside it) is
                // dropped, so a late classifier response never mutates
                // state after stop.
                tokio::select! {
                    biased;
                    _ = stop_rx.changed() => break,
                    _ = pipeline.tick(source.as_ref()) => {}
                }
            }

            pipeline.shutdown();
        });

        Self {
            session_id,
            state,
            status_rx,
            stop_tx,
            worker: Some(worker),
        }
    }

    /// Session identifier stamped on results
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// Latest published window fill status
    pub fn buffer_status(&self) -> BufferStatus {
        *self.status_rx.borrow()
    }

    /// Stop the session and wait for the worker to finish cleanup
    ///
    /// After this returns the state is Idle, the buffer is empty, and any
    /// inference that was in flight has been discarded.
    pub async fn stop(&mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(worker) = self.worker.take() {
            if let Err(err) = worker.await {
                log::error!("[CaptureSession] worker task failed: {}", err);
                // Worker died before cleanup; park the state ourselves
                self.state.set(SessionState::Idle);
            }
        }
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
            self.state.set(SessionState::Idle);
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
