//! Upload flow errors
//!
//! Every variant ends the current operation only. Some are silent; the rest
//! become a notice through [`SyncError::notice`].

use std::path::PathBuf;

use thiserror::Error;

use super::host::NoticeLevel;
use crate::config::ConfigError;
use crate::sftp::SftpError;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("No active document")]
    NoActiveDocument,

    #[error("No workspace folder is open")]
    NoWorkspace,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No SFTP context matches {0}")]
    NoMatchingContext(PathBuf),

    #[error("Password entry cancelled")]
    CredentialCancelled,

    #[error("Server connection failed: {0}")]
    Connection(SftpError),

    #[error("Transfer failed: {0}")]
    Transfer(SftpError),

    #[error("Failed to read local file: {0}")]
    LocalRead(std::io::Error),

    #[error("Failed to stage remote copy: {0}")]
    Staging(std::io::Error),
}

impl SyncError {
    /// Notice to show the user, or `None` when the failure is silent
    pub fn notice(&self) -> Option<(NoticeLevel, String)> {
        match self {
            SyncError::NoActiveDocument
            | SyncError::NoWorkspace
            | SyncError::Config(ConfigError::Missing(_)) => None,
            SyncError::Config(e) => Some((NoticeLevel::Error, e.to_string())),
            SyncError::NoMatchingContext(_) => Some((
                NoticeLevel::Warning,
                "No SFTP context in sftp.json matches this file.".to_string(),
            )),
            SyncError::CredentialCancelled => Some((
                NoticeLevel::Warning,
                "No password entered; upload cancelled.".to_string(),
            )),
            SyncError::Connection(_)
            | SyncError::Transfer(_)
            | SyncError::LocalRead(_)
            | SyncError::Staging(_) => Some((NoticeLevel::Error, self.to_string())),
        }
    }
}
