//! Infrastructure implementation of the `CommandRunner` port.
//!
//! Used for short-lived query tools such as `dpkg-query` and PowerShell's
//! `Get-Package`; never for the installer itself.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::CommandRunner;

/// Default timeout for registry queries.
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `CommandRunner`. Captures stdout/stderr and kills the child
/// when the timeout fires (`kill_on_drop` on the dropped future).
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.run_with_timeout(program, args, self.timeout).await
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        debug!(program, ?args, "running");
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => output.with_context(|| format!("waiting for {program}")),
            Err(_) => anyhow::bail!("{program} timed out after {}s", timeout.as_secs()),
        }
    }
}
