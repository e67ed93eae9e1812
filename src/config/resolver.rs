//! Local file to remote destination resolution
//!
//! Contexts are tried in configuration order and the first whose absolute
//! context path prefixes the local file wins. There is no longest-prefix
//! preference.

use std::path::{Path, PathBuf};

use crate::sftp::path_utils::{join_remote_path, normalize_local_path, relative_local_path};

use super::types::{PrefixMatch, RemoteContext};

/// Result of a successful resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// The matching context (a copy of the configured entry)
    pub context: RemoteContext,
    /// Absolute local directory the context maps
    pub context_path: PathBuf,
    /// Local file path relative to `context_path`, `/`-separated
    pub relative_path: String,
    /// `context.remote_path` joined with `relative_path`
    pub remote_path: String,
}

/// Matches local files against the configured contexts
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver {
    mode: PrefixMatch,
}

impl ConfigResolver {
    pub fn new(mode: PrefixMatch) -> Self {
        Self { mode }
    }

    /// Absolute local directory a context maps, rooted at the workspace
    pub fn context_path(workspace_root: &Path, context: &RemoteContext) -> PathBuf {
        match context.context.as_deref() {
            Some(sub) if !sub.is_empty() => normalize_local_path(&workspace_root.join(sub)),
            _ => normalize_local_path(workspace_root),
        }
    }

    /// Find the first context covering `local_file`. `None` means no match.
    pub fn resolve(
        &self,
        local_file: &Path,
        contexts: &[RemoteContext],
        workspace_root: &Path,
    ) -> Option<ResolvedTarget> {
        for context in contexts {
            let context_path = Self::context_path(workspace_root, context);
            if !self.is_prefix(&context_path, local_file) {
                continue;
            }

            let relative_path = relative_local_path(&context_path, local_file);
            let remote_path = join_remote_path(&context.remote_path, &relative_path);
            tracing::debug!(
                "Resolved {:?} via context {:?} to {}",
                local_file,
                context_path,
                remote_path
            );
            return Some(ResolvedTarget {
                context: context.clone(),
                context_path,
                relative_path,
                remote_path,
            });
        }
        None
    }

    fn is_prefix(&self, context_path: &Path, local_file: &Path) -> bool {
        match self.mode {
            PrefixMatch::String => local_file
                .to_string_lossy()
                .starts_with(&*context_path.to_string_lossy()),
            PrefixMatch::Segments => local_file.starts_with(context_path),
        }
    }
}
