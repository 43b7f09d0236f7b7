//! The immutable install request and the sources it is resolved from.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroize;

use crate::domain::error::ConfigError;
use crate::domain::path::{normalize_local_dir, normalize_remote_dir};

/// Default SSH port for the SFTP server.
pub const DEFAULT_SFTP_PORT: u16 = 22;

// ── Secret ───────────────────────────────────────────────────────────────────

/// A secret string (password, installation token).
///
/// Redacted in `Debug` output and zeroized on drop.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Reveal the secret at the point of use.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// ── Request sources ──────────────────────────────────────────────────────────

/// One partial source of request values (YAML file, environment, flags).
///
/// Every field is optional; [`RequestSources::overlay`] combines sources and
/// [`RequestSources::resolve`] turns the result into an [`InstallRequest`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestSources {
    /// Application name looked up in the installation registry.
    pub app_name: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<Secret>,
    /// Directory on the SFTP server holding the installer.
    pub remote_dir: Option<String>,
    /// Installer file name inside `remote_dir`.
    pub installer_name: Option<String>,
    /// Local directory the installer is downloaded into.
    pub local_dir: Option<String>,
    pub token: Option<Secret>,
    pub url: Option<String>,
    pub version: Option<String>,
}

impl RequestSources {
    /// Layer `over` on top of `self`; values present in `over` win.
    #[must_use]
    pub fn overlay(self, over: RequestSources) -> RequestSources {
        RequestSources {
            app_name: over.app_name.or(self.app_name),
            host: over.host.or(self.host),
            port: over.port.or(self.port),
            username: over.username.or(self.username),
            password: over.password.or(self.password),
            remote_dir: over.remote_dir.or(self.remote_dir),
            installer_name: over.installer_name.or(self.installer_name),
            local_dir: over.local_dir.or(self.local_dir),
            token: over.token.or(self.token),
            url: over.url.or(self.url),
            version: over.version.or(self.version),
        }
    }

    /// Build the immutable request, normalizing both directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for the first required value that no
    /// source supplied.
    pub fn resolve(self) -> Result<InstallRequest, ConfigError> {
        let app_name = required(self.app_name, "app_name")?;
        let endpoint = RemoteEndpoint {
            host: required(self.host, "host")?,
            port: self.port.unwrap_or(DEFAULT_SFTP_PORT),
            username: required(self.username, "username")?,
            password: required(self.password, "password")?,
        };
        let remote_dir = required(self.remote_dir, "remote_dir")?;
        let installer_name = required(self.installer_name, "installer_name")?;
        let local_dir = required(self.local_dir, "local_dir")?;
        let installer = InstallerParams {
            token: required(self.token, "token")?,
            url: required(self.url, "url")?,
            version: required(self.version, "version")?,
        };
        Ok(InstallRequest {
            app_name,
            endpoint,
            remote_dir: normalize_remote_dir(&remote_dir),
            installer_name,
            local_dir: normalize_local_dir(&local_dir),
            installer,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::Missing { field })
}

// ── Request ──────────────────────────────────────────────────────────────────

/// Connection details for the SFTP server.
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret,
}

/// Values passed to the installer on its command line.
#[derive(Debug, Clone)]
pub struct InstallerParams {
    pub token: Secret,
    pub url: String,
    pub version: String,
}

/// Everything one provisioning run needs. Immutable once resolved.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    app_name: String,
    endpoint: RemoteEndpoint,
    remote_dir: String,
    installer_name: String,
    local_dir: String,
    installer: InstallerParams,
}

impl InstallRequest {
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    #[must_use]
    pub fn endpoint(&self) -> &RemoteEndpoint {
        &self.endpoint
    }

    #[must_use]
    pub fn installer(&self) -> &InstallerParams {
        &self.installer
    }

    /// Remote source directory, ending in `/`.
    #[must_use]
    pub fn remote_dir(&self) -> &str {
        &self.remote_dir
    }

    /// Local destination directory, ending in the host separator.
    #[must_use]
    pub fn local_dir(&self) -> &str {
        &self.local_dir
    }

    /// `remote_dir + installer_name`, unescaped.
    #[must_use]
    pub fn remote_path(&self) -> String {
        format!("{}{}", self.remote_dir, self.installer_name)
    }

    /// `local_dir + installer_name`, unescaped.
    #[must_use]
    pub fn local_installer_path(&self) -> String {
        format!("{}{}", self.local_dir, self.installer_name)
    }
}
