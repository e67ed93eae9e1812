//! Local/remote comparison and confirmed upload
//!
//! The coordinator ties together config resolution, the credential cache,
//! content fingerprints, the staging area and the comparison session.

pub mod coordinator;
pub mod error;
pub mod fingerprint;
pub mod host;
pub mod staging;

pub use coordinator::{CheckOutcome, ConfirmOutcome, SyncOptions, UploadCoordinator};
pub use error::SyncError;
pub use fingerprint::{equal, fingerprint, Fingerprint};
pub use host::{diff_title, DiffRequest, EditorHost, HostEvent, NoticeLevel, Prompt};
pub use staging::{StagingArea, DEFAULT_STAGING_PREFIX};
