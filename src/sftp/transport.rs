//! Remote file transfer seam
//!
//! The coordinator talks to the server only through these traits so the
//! russh-backed implementation can be swapped for an in-memory one.

use std::path::Path;

use async_trait::async_trait;

use super::config::ConnectParams;
use super::error::SftpError;

/// Opens authenticated connections
#[async_trait]
pub trait RemoteConnector: Send + Sync {
    async fn connect(&self, params: &ConnectParams)
        -> Result<Box<dyn RemoteConnection>, SftpError>;
}

/// One open connection. Callers must call [`RemoteConnection::close`] on every path.
#[async_trait]
pub trait RemoteConnection: Send {
    /// Read the whole remote file
    async fn fetch(&mut self, remote_path: &str) -> Result<Vec<u8>, SftpError>;

    /// Overwrite `remote_path` with the contents of `local_path`
    async fn store(&mut self, local_path: &Path, remote_path: &str) -> Result<(), SftpError>;

    /// Release the connection. Failures are logged, never returned.
    async fn close(self: Box<Self>);
}
