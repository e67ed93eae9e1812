//! Safe SFTP - compare before you upload
//!
//! Checks a local file against its copy on an SFTP server, stages the remote
//! content for a diff when they differ, and uploads local edits only after the
//! user confirms on save.
//!
//! The editor is an external collaborator behind [`sync::EditorHost`]; the
//! transfer client sits behind [`sftp::RemoteConnector`].

pub mod config;
pub mod session;
pub mod sftp;
pub mod sync;

pub use config::{CredentialCache, RemoteContext, ServerIdentity};
pub use session::{ComparisonSession, SessionSlot};
pub use sftp::{SftpConnector, SftpError};
pub use sync::{
    CheckOutcome, ConfirmOutcome, EditorHost, HostEvent, StagingArea, SyncError, SyncOptions,
    UploadCoordinator,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the tracing subscriber (`RUST_LOG`, default `info`).
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
