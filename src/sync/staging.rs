//! Staging area for remote snapshots
//!
//! A private temporary directory that lives as long as the coordinator.
//! Each staged file is named after the local file's base name, so staging
//! the same file again overwrites the previous snapshot.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::fs;

/// File-name prefix of staged snapshots
pub const DEFAULT_STAGING_PREFIX: &str = "temp-remote-";

pub struct StagingArea {
    dir: TempDir,
    prefix: String,
}

impl StagingArea {
    /// Create a fresh private directory under the system temp dir
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("safe-sftp-").tempdir()?;
        tracing::debug!("Staging directory: {:?}", dir.path());
        Ok(Self {
            dir,
            prefix: DEFAULT_STAGING_PREFIX.to_string(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Where the snapshot for `local_file` goes
    pub fn path_for(&self, local_file: &Path) -> PathBuf {
        let name = local_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.dir.path().join(format!("{}{}", self.prefix, name))
    }

    /// Write `content` as the snapshot for `local_file`
    pub async fn stage(&self, local_file: &Path, content: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.path_for(local_file);
        fs::write(&path, content).await?;
        tracing::debug!("Staged {} bytes at {:?}", content.len(), path);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_writes_snapshot() {
        let staging = StagingArea::new().unwrap();
        let path = staging.stage(Path::new("/ws/src/app.js"), b"remote").await.unwrap();

        assert_eq!(path, staging.dir().join("temp-remote-app.js"));
        assert_eq!(fs::read(&path).await.unwrap(), b"remote");
    }

    #[tokio::test]
    async fn test_restaging_overwrites() {
        let staging = StagingArea::new().unwrap().with_prefix("snap-");
        let first = staging.stage(Path::new("/a/x.txt"), b"one").await.unwrap();
        let second = staging.stage(Path::new("/b/x.txt"), b"two").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read(&second).await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_directory_removed_on_drop() {
        let staging = StagingArea::new().unwrap();
        let dir = staging.dir().to_path_buf();
        assert!(dir.exists());
        drop(staging);
        assert!(!dir.exists());
    }
}
