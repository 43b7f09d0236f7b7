//! Application service: fetch-and-install use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! Steps run strictly in order: registry check, destination directory,
//! SFTP fetch, installer launch. The first failure stops the run.

use std::path::{Path, PathBuf};

use crate::application::ports::{
    InstallRegistry, LocalFs, ProcessLauncher, ProgressReporter, TransferClient,
};
use crate::domain::{InstallOutcome, InstallRequest, ProvisionError, installer_args};

/// Run the whole workflow and fold any error into a failure outcome.
///
/// Errors are reported once here, with their cause chain, and never
/// escape to the caller.
pub async fn install_agent(
    registry: &impl InstallRegistry,
    local_fs: &impl LocalFs,
    transfer: &impl TransferClient,
    launcher: &impl ProcessLauncher,
    reporter: &impl ProgressReporter,
    request: &InstallRequest,
) -> InstallOutcome {
    match run(registry, local_fs, transfer, launcher, reporter, request).await {
        Ok(outcome) => outcome,
        Err(err) => {
            reporter.error(&err.describe());
            InstallOutcome::from(&err)
        }
    }
}

async fn run(
    registry: &impl InstallRegistry,
    local_fs: &impl LocalFs,
    transfer: &impl TransferClient,
    launcher: &impl ProcessLauncher,
    reporter: &impl ProgressReporter,
    request: &InstallRequest,
) -> Result<InstallOutcome, ProvisionError> {
    let app = request.app_name();
    reporter.step(&format!("checking whether {app} is installed..."));
    if is_installed(registry, app).await? {
        reporter.success(&format!("{app} is already installed, nothing to do"));
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    ensure_dir(local_fs, reporter, request.local_dir())?;

    let installer = fetch_installer(transfer, reporter, request).await?;
    reporter.success(&format!("downloaded {}", installer.display()));

    launch_installer(launcher, reporter, &installer, request)?;
    reporter.success(&format!("{app} installer launched"));
    Ok(InstallOutcome::Success)
}

/// Ask the registry whether `app` is present.
///
/// # Errors
///
/// Returns [`ProvisionError::Registry`] if the registry cannot be queried.
pub async fn is_installed(
    registry: &impl InstallRegistry,
    app: &str,
) -> Result<bool, ProvisionError> {
    registry
        .is_installed(app)
        .await
        .map_err(|source| ProvisionError::Registry {
            app: app.to_owned(),
            source,
        })
}

/// Create the destination directory unless it already exists.
///
/// # Errors
///
/// Returns [`ProvisionError::Filesystem`] if the directory cannot be created.
pub fn ensure_dir(
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    dir: &str,
) -> Result<(), ProvisionError> {
    let path = Path::new(dir);
    if local_fs.exists(path) {
        return Ok(());
    }
    reporter.step(&format!("creating {dir}"));
    local_fs
        .create_dir_all(path)
        .map_err(|source| ProvisionError::Filesystem {
            path: dir.to_owned(),
            source,
        })
}

/// Open a session, fetch the installer, and close the session.
///
/// Once `open` succeeds, `close` is called exactly once no matter how the
/// fetch ends. A close failure is only reported as a warning.
///
/// # Errors
///
/// Returns [`ProvisionError::Connection`] if the session cannot be opened,
/// or [`ProvisionError::Transfer`] if the fetch fails.
pub async fn fetch_installer<T: TransferClient>(
    transfer: &T,
    reporter: &impl ProgressReporter,
    request: &InstallRequest,
) -> Result<PathBuf, ProvisionError> {
    let endpoint = request.endpoint();
    reporter.step(&format!(
        "connecting to {}@{}:{}",
        endpoint.username, endpoint.host, endpoint.port
    ));
    let mut session =
        transfer
            .open(endpoint)
            .await
            .map_err(|source| ProvisionError::Connection {
                host: endpoint.host.clone(),
                port: endpoint.port,
                source,
            })?;

    let remote_path = request.remote_path();
    reporter.step(&format!(
        "fetching {remote_path} to {}",
        request.local_installer_path()
    ));
    let fetched = transfer
        .fetch(&mut session, &remote_path, request.local_dir())
        .await;

    if let Err(err) = transfer.close(session).await {
        reporter.warn(&format!("closing SFTP session failed: {err:#}"));
    }

    fetched.map_err(|source| ProvisionError::Transfer {
        remote_path,
        source,
    })
}

/// Start the installer without waiting for it.
///
/// # Errors
///
/// Returns [`ProvisionError::Launch`] if the process cannot be started.
pub fn launch_installer(
    launcher: &impl ProcessLauncher,
    reporter: &impl ProgressReporter,
    installer: &Path,
    request: &InstallRequest,
) -> Result<(), ProvisionError> {
    let params = request.installer();
    let args = installer_args(params.token.expose(), &params.url, &params.version);
    reporter.step(&format!(
        "launching {} (url {}, version {})",
        installer.display(),
        params.url,
        params.version
    ));
    let pid = launcher
        .start(installer, &args)
        .map_err(|source| ProvisionError::Launch {
            path: installer.display().to_string(),
            source,
        })?;
    if let Some(pid) = pid {
        reporter.step(&format!("installer running as pid {pid}"));
    }
    Ok(())
}
