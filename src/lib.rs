// ISL Translator Core - Gesture Recognition Engine
// Real-time landmark capture, windowing and sequence classification

// Module declarations
pub mod capture;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod landmarks;
pub mod managers;
pub mod recognition;
pub mod testing;

// Re-exports for convenience
pub use engine::TranslatorHandle;

/// Initialize logging for host builds
///
/// Honors RUST_LOG; `log` records from the engine are bridged into the
/// tracing subscriber. Safe to call once per process.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
