//! YAML request file loading.
//!
//! The orchestrator can hand over the request as a file instead of (or in
//! addition to) flags and `PROVISION_*` variables. Unknown keys are rejected.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::RequestSources;

/// Read and parse a request file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid request.
pub fn load_request_file(path: &Path) -> Result<RequestSources> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}
