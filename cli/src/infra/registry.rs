//! Installation-registry queries: implements the `InstallRegistry` port.
//!
//! Windows asks PowerShell's package provider; everywhere else asks dpkg.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, InstallRegistry};
use crate::infra::command_runner::TokioCommandRunner;

/// `dpkg-query` status line for a fully installed package.
const DPKG_INSTALLED: &str = "install ok installed";

/// Production `InstallRegistry` that shells out to the platform's package
/// query tool through a `CommandRunner`.
///
/// Only Windows (`Get-Package`) and dpkg-based Linux (`dpkg-query`) are
/// supported. Elsewhere the query tool is missing and every run fails with
/// a registry error naming it.
pub struct SystemRegistry<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> SystemRegistry<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl SystemRegistry<TokioCommandRunner> {
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> InstallRegistry for SystemRegistry<R> {
    async fn is_installed(&self, app_name: &str) -> Result<bool> {
        if cfg!(windows) {
            self.query_windows(app_name).await
        } else {
            self.query_dpkg(app_name).await
        }
    }
}

impl<R: CommandRunner> SystemRegistry<R> {
    async fn query_windows(&self, app_name: &str) -> Result<bool> {
        let script = format!(
            "Get-Package -Name '{}' -ErrorAction Stop | Out-Null",
            quote_powershell(app_name)
        );
        let output = self
            .runner
            .run(
                "powershell",
                &["-NoProfile", "-NonInteractive", "-Command", &script],
            )
            .await
            .context("PowerShell Get-Package is unavailable")?;
        Ok(output.status.success())
    }

    async fn query_dpkg(&self, app_name: &str) -> Result<bool> {
        let output = self
            .runner
            .run("dpkg-query", &["-W", "-f=${Status}", app_name])
            .await
            .context("dpkg-query is unavailable (registry checks need Windows or a dpkg-based system)")?;
        Ok(output.status.success()
            && String::from_utf8_lossy(&output.stdout).contains(DPKG_INSTALLED))
    }
}

/// Escape a value for use inside a single-quoted PowerShell string.
fn quote_powershell(value: &str) -> String {
    value.replace('\'', "''")
}
