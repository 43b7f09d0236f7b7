//! Installer command-line construction.

/// First argument passed to the installer.
pub const INSTALL_VERB: &str = "install";

/// Build the installer argument list.
///
/// Each flag and its value travel as ONE argument joined by a single space
/// (`"-token T"`, not `"-token", "T"`). The installer expects exactly this.
#[must_use]
pub fn installer_args(token: &str, url: &str, version: &str) -> Vec<String> {
    vec![
        INSTALL_VERB.to_owned(),
        format!("-token {token}"),
        format!("-url {url}"),
        format!("-version {version}"),
    ]
}
