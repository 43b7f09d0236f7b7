//! `TracingReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Forwards application progress events to `tracing`, so every step becomes
//! one timestamped line in the log stream the orchestrator captures.

use crate::application::ports::ProgressReporter;

/// Progress reporter that emits `tracing` events under the `provision` target.
///
/// - `step()` and `success()` log at `INFO`
/// - `warn()` logs at `WARN`
/// - `error()` logs at `ERROR`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn step(&self, message: &str) {
        tracing::info!(target: "provision", "{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!(target: "provision", outcome = "ok", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "provision", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "provision", "{message}");
    }
}
