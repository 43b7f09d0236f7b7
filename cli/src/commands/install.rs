//! `agent-provision install`: fetch the installer over SFTP and launch it.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::install_agent::install_agent;
use crate::domain::{ExitCodePolicy, RequestSources, Secret};
use crate::infra::config::load_request_file;

/// Arguments for the install command.
///
/// Every value can also come from a `PROVISION_*` environment variable or a
/// YAML request file. Flags override the environment, which overrides the file.
#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// YAML request file with default values
    #[arg(long, env = "PROVISION_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Application name looked up in the installation registry
    #[arg(long, env = "PROVISION_APP_NAME")]
    pub app_name: Option<String>,

    /// SFTP server host name or address
    #[arg(long, env = "PROVISION_HOST")]
    pub host: Option<String>,

    /// SFTP server port [default: 22]
    #[arg(long, env = "PROVISION_PORT")]
    pub port: Option<u16>,

    /// SFTP user name
    #[arg(long, env = "PROVISION_USER")]
    pub username: Option<String>,

    /// SFTP password (prefer the environment variable)
    #[arg(long, env = "PROVISION_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Directory on the server that holds the installer
    #[arg(long, env = "PROVISION_REMOTE_DIR")]
    pub remote_dir: Option<String>,

    /// Installer file name inside the remote directory
    #[arg(long = "installer", env = "PROVISION_INSTALLER")]
    pub installer_name: Option<String>,

    /// Local directory the installer is downloaded into
    #[arg(long, env = "PROVISION_LOCAL_DIR")]
    pub local_dir: Option<String>,

    /// Installation token passed to the installer (prefer the environment variable)
    #[arg(long, env = "PROVISION_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Web-service URL passed to the installer
    #[arg(long, env = "PROVISION_URL")]
    pub url: Option<String>,

    /// Agent version passed to the installer
    #[arg(long = "agent-version", env = "PROVISION_AGENT_VERSION")]
    pub agent_version: Option<String>,

    /// Exit with 2 (instead of 1) when the install fails
    #[arg(long)]
    pub strict_exit_codes: bool,
}

impl InstallArgs {
    /// The values given as flags or environment variables.
    #[must_use]
    pub fn sources(&self) -> RequestSources {
        RequestSources {
            app_name: self.app_name.clone(),
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone().map(Secret::new),
            remote_dir: self.remote_dir.clone(),
            installer_name: self.installer_name.clone(),
            local_dir: self.local_dir.clone(),
            token: self.token.clone().map(Secret::new),
            url: self.url.clone(),
            version: self.agent_version.clone(),
        }
    }

    #[must_use]
    pub fn exit_code_policy(&self) -> ExitCodePolicy {
        if self.strict_exit_codes {
            ExitCodePolicy::Strict
        } else {
            ExitCodePolicy::Legacy
        }
    }
}

/// Layer the request file (if any) under the flag/env values.
///
/// # Errors
///
/// Returns an error if the request file cannot be loaded.
pub fn collect_sources(args: &InstallArgs) -> Result<RequestSources> {
    let base = match &args.config {
        Some(path) => load_request_file(path)?,
        None => RequestSources::default(),
    };
    Ok(base.overlay(args.sources()))
}

/// Run `agent-provision install` and return the process exit code.
///
/// # Errors
///
/// Returns an error if the request cannot be assembled. Workflow failures
/// are not errors; they are reported through the returned exit code.
pub async fn run(args: &InstallArgs, app: &AppContext) -> Result<i32> {
    let request = collect_sources(args)?.resolve()?;
    let policy = args.exit_code_policy();

    let outcome = install_agent(
        &app.registry,
        &app.fs,
        &app.transfer,
        &app.launcher,
        &app.reporter,
        &request,
    )
    .await;

    app.renderer()
        .render_outcome(request.app_name(), &outcome, policy)?;
    Ok(outcome.exit_code(policy))
}
