//! Fire-and-forget process start: implements the `ProcessLauncher` port.

use std::path::Path;
use std::process::Stdio;

use anyhow::{Context, Result};

use crate::application::ports::ProcessLauncher;

/// Production `ProcessLauncher`.
///
/// The child is detached: stdio goes to null, `kill_on_drop` stays off, and
/// the handle is dropped right after spawning. Its exit status is never read.
pub struct TokioProcessLauncher;

impl ProcessLauncher for TokioProcessLauncher {
    fn start(&self, program: &Path, args: &[String]) -> Result<Option<u32>> {
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false)
            .spawn()
            .with_context(|| format!("failed to spawn {}", program.display()))?;
        Ok(child.id())
    }
}
