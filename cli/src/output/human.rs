//! Human-readable terminal renderer.

use crate::domain::InstallOutcome;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the final line of a provisioning run.
    pub fn render_outcome(&self, app_name: &str, outcome: &InstallOutcome) {
        match outcome {
            InstallOutcome::Success => self
                .ctx
                .success(&format!("{app_name} installer launched")),
            InstallOutcome::AlreadyInstalled => self
                .ctx
                .info(&format!("{app_name} is already installed")),
            InstallOutcome::Failed { kind, message } => {
                self.ctx.error(&format!("{kind:?} failure: {message}"));
            }
        }
    }
}

/// Render the CLI version string.
#[must_use]
pub fn version_line(version: &str) -> String {
    format!("agent-provision {version}")
}
