//! Pending comparison session
//!
//! At most one comparison is open at a time. Opening a new one replaces the
//! old one (last write wins); closing the staged diff clears it. A session is
//! never modified in place.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::config::RemoteContext;

/// One local file waiting for the user to confirm an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSession {
    /// File open in the editor
    pub local_path: PathBuf,
    /// Destination on the server
    pub remote_path: String,
    /// Context the destination was resolved through
    pub context: RemoteContext,
    /// Local copy of the remote content shown in the diff
    pub staging_path: PathBuf,
}

/// Single-slot holder for the active [`ComparisonSession`]
#[derive(Debug, Default)]
pub struct SessionSlot {
    current: Mutex<Option<ComparisonSession>>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `session`, returning whatever it displaced
    pub fn replace(&self, session: ComparisonSession) -> Option<ComparisonSession> {
        let previous = self.current.lock().replace(session);
        if let Some(ref old) = previous {
            info!(
                "Replacing open comparison for {:?} (last write wins)",
                old.local_path
            );
        }
        previous
    }

    /// Snapshot of the active session
    pub fn current(&self) -> Option<ComparisonSession> {
        self.current.lock().clone()
    }

    pub fn is_active(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Active session if `saved` is exactly its local file
    pub fn for_local(&self, saved: &Path) -> Option<ComparisonSession> {
        self.current
            .lock()
            .as_ref()
            .filter(|s| s.local_path.as_path() == saved)
            .cloned()
    }

    /// Clear the session if `closed` is its staged snapshot
    pub fn clear_if_staging(&self, closed: &Path) -> Option<ComparisonSession> {
        let mut current = self.current.lock();
        let is_staging = current
            .as_ref()
            .is_some_and(|s| s.staging_path.as_path() == closed);
        if is_staging {
            current.take()
        } else {
            debug!("Ignoring close of {:?}: not the staged snapshot", closed);
            None
        }
    }

    /// Clear unconditionally
    pub fn clear(&self) -> Option<ComparisonSession> {
        self.current.lock().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(name: &str) -> ComparisonSession {
        ComparisonSession {
            local_path: PathBuf::from(format!("/ws/{}", name)),
            remote_path: format!("/srv/{}", name),
            context: RemoteContext::new("h1", "u", "/srv"),
            staging_path: PathBuf::from(format!("/tmp/stage/temp-remote-{}", name)),
        }
    }

    #[test]
    fn test_replace_is_last_write_wins() {
        let slot = SessionSlot::new();
        assert!(slot.replace(session("a.txt")).is_none());

        let displaced = slot.replace(session("b.txt"));
        assert_eq!(displaced, Some(session("a.txt")));
        assert_eq!(slot.current(), Some(session("b.txt")));
    }

    #[test]
    fn test_for_local_requires_exact_path() {
        let slot = SessionSlot::new();
        assert!(slot.for_local(Path::new("/ws/a.txt")).is_none());

        slot.replace(session("a.txt"));
        assert!(slot.for_local(Path::new("/ws/a.txt")).is_some());
        assert!(slot.for_local(Path::new("/ws/b.txt")).is_none());
        assert!(slot.for_local(Path::new("/ws/a.txt.bak")).is_none());
    }

    #[test]
    fn test_clear_if_staging() {
        let slot = SessionSlot::new();
        slot.replace(session("a.txt"));

        assert!(slot.clear_if_staging(Path::new("/ws/a.txt")).is_none());
        assert!(slot.is_active());

        let cleared = slot.clear_if_staging(Path::new("/tmp/stage/temp-remote-a.txt"));
        assert_eq!(cleared, Some(session("a.txt")));
        assert!(!slot.is_active());
        assert!(slot.current().is_none());
    }

    #[test]
    fn test_clear() {
        let slot = SessionSlot::new();
        assert!(slot.clear().is_none());
        slot.replace(session("a.txt"));
        assert!(slot.clear().is_some());
        assert!(!slot.is_active());
    }
}
