//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod error;
pub mod installer;
pub mod outcome;
pub mod path;
pub mod request;

pub use error::{ConfigError, ProvisionError};
pub use installer::installer_args;
pub use outcome::{ExitCodePolicy, FailureKind, InstallOutcome};
pub use path::{LOCAL_SEPARATOR, REMOTE_SEPARATOR, normalize};
pub use request::{InstallRequest, RemoteEndpoint, RequestSources, Secret};
