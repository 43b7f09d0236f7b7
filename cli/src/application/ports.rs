//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::RemoteEndpoint;

// ── Installation Registry Port ────────────────────────────────────────────────

/// Local record of installed applications.
#[allow(async_fn_in_trait)]
pub trait InstallRegistry {
    /// Whether an application called `app_name` is registered as installed.
    ///
    /// # Errors
    ///
    /// Returns an error only when the registry cannot be queried at all.
    async fn is_installed(&self, app_name: &str) -> Result<bool>;
}

// ── File Transfer Port ────────────────────────────────────────────────────────

/// Secure file-transfer client: one session, one fetch, one close.
///
/// `close` takes the session by value, so a session can be closed at most
/// once and is never reused after it.
#[allow(async_fn_in_trait)]
pub trait TransferClient {
    /// Open, authenticated session bound to one server.
    type Session;

    /// Connect and authenticate. Unknown host keys are accepted
    /// (trust-on-first-use).
    async fn open(&self, endpoint: &RemoteEndpoint) -> Result<Self::Session>;

    /// Copy `remote_path` into the directory `local_dir`, keeping the remote
    /// base name. Returns the path of the written file.
    async fn fetch(
        &self,
        session: &mut Self::Session,
        remote_path: &str,
        local_dir: &str,
    ) -> Result<PathBuf>;

    /// Tear the session down. Best-effort.
    async fn close(&self, session: Self::Session) -> Result<()>;
}

// ── Local Filesystem Port ─────────────────────────────────────────────────────

/// The local filesystem operations the workflow needs.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

// ── Process Launch Port ───────────────────────────────────────────────────────

/// Starts an executable without waiting for it.
pub trait ProcessLauncher {
    /// Start `program` with `args`. Returns the OS process id when known.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started.
    fn start(&self, program: &Path, args: &[String]) -> Result<Option<u32>>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an error message.
    fn error(&self, message: &str);
}
