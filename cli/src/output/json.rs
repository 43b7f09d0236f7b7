//! JSON output helpers.
//!
//! `--json` prints exactly one document on stdout: either the outcome report
//! or, when the command fails before the workflow runs, an error object.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{ExitCodePolicy, FailureKind, InstallOutcome};

/// Serialized form of an [`InstallOutcome`].
#[derive(Debug, Serialize)]
pub struct OutcomeReport<'a> {
    pub status: &'static str,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

impl<'a> OutcomeReport<'a> {
    #[must_use]
    pub fn new(outcome: &'a InstallOutcome, policy: ExitCodePolicy) -> Self {
        let (kind, message) = match outcome {
            InstallOutcome::Failed { kind, message } => (Some(*kind), Some(message.as_str())),
            _ => (None, None),
        };
        Self {
            status: outcome.status(),
            exit_code: outcome.exit_code(policy),
            kind,
            message,
        }
    }
}

/// Machine-readable renderer.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Print the outcome report on stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_outcome(&self, outcome: &InstallOutcome, policy: ExitCodePolicy) -> Result<()> {
        println!("{}", format_outcome(outcome, policy)?);
        Ok(())
    }
}

/// Pretty-printed JSON for an outcome.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_outcome(outcome: &InstallOutcome, policy: ExitCodePolicy) -> Result<String> {
    serde_json::to_string_pretty(&OutcomeReport::new(outcome, policy))
        .context("JSON serialization failed")
}

/// Format a JSON error object for failures outside the workflow.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
