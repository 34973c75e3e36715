//! Configuration management for dynamic parameter tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling fast iteration without recompilation. Capture cadence, buffer
//! policy, and the confidence threshold can all be adjusted via the config
//! file for rapid experimentation.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::recognition::window::BufferMode;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub recognition: RecognitionConfig,
}

/// Capture loop parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Interval between landmark sampling ticks, in milliseconds
    pub tick_interval_ms: u64,
    /// Window buffering policy (sliding overlap vs discrete batches)
    pub buffer_mode: BufferMode,
    /// Log buffer statistics every N ticks
    pub log_every_n_ticks: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            // 10 Hz sampling: 30 frames fill a window in 3 seconds
            tick_interval_ms: 100,
            buffer_mode: BufferMode::Sliding,
            log_every_n_ticks: 50,
        }
    }
}

/// Recognition and decision-gate parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Minimum classifier confidence for a result to surface to the user
    pub confidence_threshold: f32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.7,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file
    ///
    /// Falls back to defaults (with a logged warning) if the file doesn't
    /// exist or contains invalid JSON, so a broken config never prevents
    /// the pipeline from starting.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    AppConfig::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                AppConfig::default()
            }
        };
        config.validated()
    }

    /// Load configuration from the default location (`isl_config.json` in
    /// the working directory), falling back to defaults if absent.
    pub fn load() -> Self {
        Self::load_from_file("isl_config.json")
    }

    /// Clamp out-of-range values to their valid domains
    ///
    /// Keeps the pipeline well-defined even with a hand-edited config:
    /// the threshold lives in [0, 1] and the tick interval must be nonzero.
    pub fn validated(mut self) -> Self {
        let threshold = self.recognition.confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) || threshold.is_nan() {
            let clamped = if threshold.is_nan() {
                RecognitionConfig::default().confidence_threshold
            } else {
                threshold.clamp(0.0, 1.0)
            };
            log::warn!(
                "[Config] confidence_threshold {} out of range, clamping to {}",
                threshold,
                clamped
            );
            self.recognition.confidence_threshold = clamped;
        }
        if self.capture.tick_interval_ms == 0 {
            let fallback = CaptureConfig::default().tick_interval_ms;
            log::warn!(
                "[Config] tick_interval_ms must be > 0, using default {}ms",
                fallback
            );
            self.capture.tick_interval_ms = fallback;
        }
        self
    }
}
