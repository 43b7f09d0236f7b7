//! Terminal result of a provisioning run.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use serde::Serialize;

use crate::domain::error::ProvisionError;

/// Which step of the workflow failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Registry,
    Filesystem,
    Connection,
    Transfer,
    Launch,
}

/// How outcomes map onto process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitCodePolicy {
    /// `0` on success, `1` for both "already installed" and failures.
    #[default]
    Legacy,
    /// Like `Legacy`, but failures exit with `2`.
    Strict,
}

/// Result of one provisioning run. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The installer was fetched and launched. Says nothing about whether
    /// the installer itself finished or succeeded.
    Success,
    /// The application was already registered; nothing was touched.
    AlreadyInstalled,
    /// A step failed; the workflow stopped there.
    Failed { kind: FailureKind, message: String },
}

impl InstallOutcome {
    /// Short machine-readable status name.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::AlreadyInstalled => "already_installed",
            Self::Failed { .. } => "failed",
        }
    }

    #[must_use]
    pub fn exit_code(&self, policy: ExitCodePolicy) -> i32 {
        match (self, policy) {
            (Self::Success, _) => 0,
            (Self::AlreadyInstalled, _) | (Self::Failed { .. }, ExitCodePolicy::Legacy) => 1,
            (Self::Failed { .. }, ExitCodePolicy::Strict) => 2,
        }
    }
}

impl From<&ProvisionError> for InstallOutcome {
    fn from(err: &ProvisionError) -> Self {
        Self::Failed {
            kind: err.kind(),
            message: err.describe(),
        }
    }
}
