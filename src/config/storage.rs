//! Configuration Storage
//!
//! Loads the remote context list from the workspace config file.
//! Default location: `<workspace>/.vscode/sftp.json`

use std::path::{Path, PathBuf};

use tokio::fs;

use super::types::RemoteContext;

/// Config file path relative to the workspace root
pub const DEFAULT_CONFIG_FILE: &str = ".vscode/sftp.json";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse sftp.json: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Get the config file path for a workspace
pub fn config_file(workspace_root: &Path, relative: &Path) -> PathBuf {
    workspace_root.join(relative)
}

/// Workspace configuration reader
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Storage for the default config file of a workspace
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self::with_path(config_file(workspace_root, Path::new(DEFAULT_CONFIG_FILE)))
    }

    /// Storage with custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every configured context, in file order.
    ///
    /// The document may be a single object or an array of objects.
    pub async fn load(&self) -> Result<Vec<RemoteContext>, ConfigError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::Missing(self.path.clone()));
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let contexts = parse_contexts(&contents)?;
        tracing::debug!(
            "Loaded {} remote context(s) from {:?}",
            contexts.len(),
            self.path
        );
        Ok(contexts)
    }
}

/// Parse a config document into its context list
pub fn parse_contexts(contents: &str) -> Result<Vec<RemoteContext>, ConfigError> {
    let value: serde_json::Value = serde_json::from_str(contents)?;
    let contexts = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    Ok(contexts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn write_config(root: &Path, contents: &str) {
        let path = config_file(root, Path::new(DEFAULT_CONFIG_FILE));
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, contents).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_missing() {
        let temp = tempdir().unwrap();
        let storage = ConfigStorage::for_workspace(temp.path());

        let err = storage.load().await.unwrap_err();
        assert!(matches!(err, ConfigError::Missing(_)));
    }

    #[tokio::test]
    async fn test_load_single_object() {
        let temp = tempdir().unwrap();
        write_config(
            temp.path(),
            r#"{ "host": "h1", "username": "u", "remotePath": "/srv" }"#,
        )
        .await;

        let contexts = ConfigStorage::for_workspace(temp.path()).load().await.unwrap();
        assert_eq!(contexts, vec![RemoteContext::new("h1", "u", "/srv")]);
    }

    #[tokio::test]
    async fn test_load_array_keeps_order() {
        let temp = tempdir().unwrap();
        write_config(
            temp.path(),
            r#"[
                { "name": "api", "context": "api", "host": "h1", "username": "u", "remotePath": "/api" },
                { "name": "web", "host": "h2", "port": 2222, "username": "u", "remotePath": "/web" }
            ]"#,
        )
        .await;

        let contexts = ConfigStorage::for_workspace(temp.path()).load().await.unwrap();
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].name.as_deref(), Some("api"));
        assert_eq!(contexts[1].effective_port(), 2222);
    }

    #[tokio::test]
    async fn test_load_malformed() {
        let temp = tempdir().unwrap();
        write_config(temp.path(), "{ host: ").await;

        let err = ConfigStorage::for_workspace(temp.path()).load().await.unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_contexts("42").is_err());
        assert!(parse_contexts(r#"[{ "host": "h1" }]"#).is_err());
    }
}
