//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

use crate::domain::outcome::FailureKind;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// A failed provisioning step. Every variant aborts the workflow.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("cannot query installation registry for '{app}'")]
    Registry {
        app: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot prepare local directory {path}")]
    Filesystem {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot open SFTP session to {host}:{port}")]
    Connection {
        host: String,
        port: u16,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot fetch {remote_path}")]
    Transfer {
        remote_path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot start installer {path}")]
    Launch {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ProvisionError {
    /// The discriminant reported in the failure outcome.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Registry { .. } => FailureKind::Registry,
            Self::Filesystem { .. } => FailureKind::Filesystem,
            Self::Connection { .. } => FailureKind::Connection,
            Self::Transfer { .. } => FailureKind::Transfer,
            Self::Launch { .. } => FailureKind::Launch,
        }
    }

    /// The error message followed by its whole cause chain.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        message
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while resolving the install request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting '{field}' (flag, PROVISION_* env var, or request file)")]
    Missing { field: &'static str },
}
