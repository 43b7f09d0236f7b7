//! Application context: unified state passed to every command handler.
//!
//! Holds the output settings and the production implementations of every
//! port the install workflow needs.

use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::StdFs;
use crate::infra::launcher::TokioProcessLauncher;
use crate::infra::registry::SystemRegistry;
use crate::infra::sftp::SftpTransfer;
use crate::output::{HumanRenderer, JsonRenderer, OutputContext, Renderer, TracingReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Installation registry backed by the platform package tool.
    pub registry: SystemRegistry<TokioCommandRunner>,
    /// Local filesystem.
    pub fs: StdFs,
    /// SFTP client.
    pub transfer: SftpTransfer,
    /// Detached process launcher for the installer.
    pub launcher: TokioProcessLauncher,
    /// Progress events go to the tracing log stream.
    pub reporter: TracingReporter,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            registry: SystemRegistry::default_runner(),
            fs: StdFs,
            transfer: SftpTransfer::new(),
            launcher: TokioProcessLauncher,
            reporter: TracingReporter,
        }
    }

    /// Returns the appropriate `Renderer` variant for the current output mode.
    #[must_use]
    pub fn renderer(&self) -> Renderer<'_> {
        match self.mode {
            OutputMode::Human => Renderer::Human(HumanRenderer::new(&self.output)),
            OutputMode::Json => Renderer::Json(JsonRenderer),
        }
    }
}
