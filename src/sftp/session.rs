//! SFTP Session
//!
//! One authenticated SSH connection with the SFTP subsystem started.
//! Provides whole-file fetch and overwrite.

use std::path::Path;

use async_trait::async_trait;
use russh::client::Handle;
use russh_sftp::client::error::Error as SftpErrorInner;
use russh_sftp::client::SftpSession as RusshSftpSession;
use russh_sftp::protocol::OpenFlags;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::client::ClientHandler;
use super::error::SftpError;
use super::transport::RemoteConnection;

/// SFTP Session wrapper
pub struct SftpSession {
    /// russh SFTP session
    sftp: RusshSftpSession,
    /// SSH connection the subsystem runs on
    handle: Handle<ClientHandler>,
    /// `host:port` for log lines
    address: String,
}

impl SftpSession {
    /// Start the SFTP subsystem on an authenticated connection
    pub async fn open(handle: Handle<ClientHandler>, address: String) -> Result<Self, SftpError> {
        info!("Opening SFTP subsystem on {}", address);

        let channel = handle
            .channel_open_session()
            .await
            .map_err(|e| SftpError::ChannelError(e.to_string()))?;

        channel.request_subsystem(true, "sftp").await.map_err(|e| {
            SftpError::SubsystemNotAvailable(format!("Failed to request SFTP subsystem: {}", e))
        })?;

        let sftp = RusshSftpSession::new(channel.into_stream())
            .await
            .map_err(|e| SftpError::SubsystemNotAvailable(e.to_string()))?;

        info!("SFTP subsystem opened on {}", address);

        Ok(Self {
            sftp,
            handle,
            address,
        })
    }

    /// Read a whole remote file into memory
    pub async fn read_file(&self, path: &str) -> Result<Vec<u8>, SftpError> {
        debug!("Reading remote file: {}", path);
        let content = self
            .sftp
            .read(path)
            .await
            .map_err(|e| map_sftp_error(e, path))?;
        debug!("Read {} bytes from {}", content.len(), path);
        Ok(content)
    }

    /// Write content to a remote file
    ///
    /// The file is created if it doesn't exist, or truncated and overwritten
    /// if it does.
    pub async fn write_content(&self, path: &str, content: &[u8]) -> Result<(), SftpError> {
        debug!("Writing {} bytes to file: {}", content.len(), path);

        let mut file = self
            .sftp
            .open_with_flags(
                path,
                OpenFlags::CREATE | OpenFlags::TRUNCATE | OpenFlags::WRITE,
            )
            .await
            .map_err(|e| map_sftp_error(e, path))?;

        file.write_all(content)
            .await
            .map_err(|e| SftpError::WriteError(format!("Failed to write content: {}", e)))?;

        file.flush()
            .await
            .map_err(|e| SftpError::WriteError(format!("Failed to flush file: {}", e)))?;

        file.shutdown()
            .await
            .map_err(|e| SftpError::WriteError(format!("Failed to close file: {}", e)))?;

        info!("Successfully wrote {} bytes to {}", content.len(), path);
        Ok(())
    }
}

#[async_trait]
impl RemoteConnection for SftpSession {
    async fn fetch(&mut self, remote_path: &str) -> Result<Vec<u8>, SftpError> {
        self.read_file(remote_path).await
    }

    async fn store(&mut self, local_path: &Path, remote_path: &str) -> Result<(), SftpError> {
        let content = tokio::fs::read(local_path).await?;
        self.write_content(remote_path, &content).await
    }

    async fn close(self: Box<Self>) {
        let Self {
            sftp,
            handle,
            address,
        } = *self;

        if let Err(e) = sftp.close().await {
            debug!("SFTP close on {} reported: {}", address, e);
        }
        if let Err(e) = handle
            .disconnect(russh::Disconnect::ByApplication, "Session closed", "en")
            .await
        {
            warn!("Failed to disconnect from {}: {}", address, e);
        }
        info!("Closed SFTP connection to {}", address);
    }
}

/// Map SFTP errors to our error type
fn map_sftp_error(err: SftpErrorInner, path: &str) -> SftpError {
    let err_str = err.to_string();
    if err_str.contains("No such file") || err_str.contains("not found") {
        SftpError::FileNotFound(path.to_string())
    } else if err_str.contains("Permission denied") {
        SftpError::PermissionDenied(path.to_string())
    } else {
        SftpError::ProtocolError(err_str)
    }
}

