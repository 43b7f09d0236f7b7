//! SFTP implementation of the `TransferClient` port.
//!
//! Password authentication over russh, file access over russh-sftp.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use russh::client::{self, Config, Handle, Handler};
use russh::keys::ssh_key::{HashAlg, PublicKey};
use russh::Disconnect;
use russh_sftp::client::SftpSession;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tracing::{debug, warn};

use crate::application::ports::TransferClient;
use crate::domain::path::local_target;
use crate::domain::RemoteEndpoint;

/// Client handler that accepts whatever host key the server presents.
///
/// Provisioning runs unattended, so there is nobody to confirm an unknown
/// key. The fingerprint is logged so the acceptance can be audited.
struct TrustOnFirstUse {
    host: String,
}

impl Handler for TrustOnFirstUse {
    type Error = russh::Error;

    fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> impl std::future::Future<Output = std::result::Result<bool, Self::Error>> + Send {
        warn!(
            host = %self.host,
            fingerprint = %server_public_key.fingerprint(HashAlg::Sha256),
            "accepting unverified SFTP host key"
        );
        async { Ok(true) }
    }
}

/// An open SSH connection with the SFTP subsystem started on it.
///
/// Dropping the session also drops the SSH handle, which ends the
/// connection even if `close` was never reached.
pub struct SftpConnection {
    handle: Handle<TrustOnFirstUse>,
    sftp: SftpSession,
}

/// Production `TransferClient` backed by russh and russh-sftp.
///
/// No connect or transfer timeout is set; a stalled server blocks until the
/// caller gives up.
pub struct SftpTransfer {
    config: Arc<Config>,
}

impl SftpTransfer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Arc::new(Config::default()),
        }
    }
}

impl Default for SftpTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferClient for SftpTransfer {
    type Session = SftpConnection;

    async fn open(&self, endpoint: &RemoteEndpoint) -> Result<SftpConnection> {
        let handler = TrustOnFirstUse {
            host: endpoint.host.clone(),
        };
        debug!(host = %endpoint.host, port = endpoint.port, "connecting");
        let mut handle = client::connect(
            Arc::clone(&self.config),
            (endpoint.host.as_str(), endpoint.port),
            handler,
        )
        .await
        .with_context(|| format!("connecting to {}:{}", endpoint.host, endpoint.port))?;

        let auth = handle
            .authenticate_password(&endpoint.username, endpoint.password.expose())
            .await
            .context("password authentication")?;
        anyhow::ensure!(
            auth.success(),
            "server rejected credentials for user '{}'",
            endpoint.username
        );

        let channel = handle
            .channel_open_session()
            .await
            .context("opening SFTP channel")?;
        channel
            .request_subsystem(true, "sftp")
            .await
            .context("requesting SFTP subsystem")?;
        let sftp = SftpSession::new(channel.into_stream())
            .await
            .context("initialising SFTP session")?;

        Ok(SftpConnection { handle, sftp })
    }

    async fn fetch(
        &self,
        session: &mut SftpConnection,
        remote_path: &str,
        local_dir: &str,
    ) -> Result<PathBuf> {
        let local_path = local_target(local_dir, remote_path)
            .map(PathBuf::from)
            .with_context(|| format!("remote path {remote_path} has no file name"))?;

        let mut remote = session
            .sftp
            .open(remote_path)
            .await
            .with_context(|| format!("opening remote file {remote_path}"))?;
        let bytes = receive_file(&mut remote, &local_path)
            .await
            .with_context(|| format!("copying {remote_path}"))?;

        debug!(remote_path, local_path = %local_path.display(), bytes, "fetched");
        Ok(local_path)
    }

    async fn close(&self, session: SftpConnection) -> Result<()> {
        let SftpConnection { handle, sftp } = session;
        let sftp_closed = sftp.close().await.context("closing SFTP subsystem");
        handle
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
            .context("disconnecting SSH session")?;
        sftp_closed
    }
}

/// Stream `source` into a new file at `local_path` and sync it to disk.
///
/// On failure the partial file is removed, so a truncated installer is
/// never left behind for the launcher.
async fn receive_file<R>(source: &mut R, local_path: &Path) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let written = write_file(source, local_path).await;
    if written.is_err() {
        if let Err(err) = tokio::fs::remove_file(local_path).await {
            debug!(path = %local_path.display(), %err, "partial file not removed");
        }
    }
    written
}

async fn write_file<R>(source: &mut R, local_path: &Path) -> Result<u64>
where
    R: AsyncRead + Unpin,
{
    let mut local = tokio::fs::File::create(local_path)
        .await
        .with_context(|| format!("creating {}", local_path.display()))?;
    let bytes = tokio::io::copy(source, &mut local)
        .await
        .with_context(|| format!("writing {}", local_path.display()))?;
    local
        .flush()
        .await
        .with_context(|| format!("flushing {}", local_path.display()))?;
    local
        .sync_all()
        .await
        .with_context(|| format!("syncing {}", local_path.display()))?;
    Ok(bytes)
}
