//! Editor host collaborator
//!
//! Everything the coordinator needs from the editor: accessors, prompts,
//! notices, and the diff view. Prompts resolve to [`Prompt`] instead of
//! failing, so a dismissed dialog is an ordinary value.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Answer to an interactive prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<T> {
    Value(T),
    Cancelled,
}

impl<T> Prompt<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Prompt::Value(v) => Some(v),
            Prompt::Cancelled => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Prompt::Value(v) => Some(v),
            Prompt::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Prompt::Cancelled)
    }
}

impl<T> From<Option<T>> for Prompt<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Prompt::Cancelled, Prompt::Value)
    }
}

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Two-pane diff: staged remote snapshot on the left, local file on the right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    pub left: PathBuf,
    pub right: PathBuf,
    pub title: String,
}

/// Document lifecycle events forwarded by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Saved(PathBuf),
    Closed(PathBuf),
}

#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Path of the focused document, if any
    fn active_document(&self) -> Option<PathBuf>;

    /// Root of the open workspace, if any
    fn workspace_root(&self) -> Option<PathBuf>;

    /// Masked free-text input
    async fn prompt_secret(&self, prompt: &str) -> Prompt<String>;

    /// Yes/no question. `Value(true)` is the only affirmative answer.
    async fn confirm(&self, message: &str) -> Prompt<bool>;

    async fn show_diff(&self, request: DiffRequest);

    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Title shown on the diff view for `local`
pub fn diff_title(local: &Path) -> String {
    let name = local
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("Remote ↔ Local: {}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_from_option() {
        assert_eq!(Prompt::from(Some(3)), Prompt::Value(3));
        assert!(Prompt::<i32>::from(None).is_cancelled());
        assert_eq!(Prompt::Value("x").into_value(), Some("x"));
    }

    #[test]
    fn test_diff_title() {
        assert_eq!(diff_title(Path::new("/ws/src/app.js")), "Remote ↔ Local: app.js");
    }
}
