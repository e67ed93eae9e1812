//! Upload coordinator
//!
//! Drives the two user flows:
//! - upload command: resolve, fetch, compare, and either report "identical"
//!   or stage the remote copy, open a comparison session and show a diff
//! - save of the compared file: confirm, then overwrite the remote file
//!
//! Closing the staged diff ends the session. Every connection opened here is
//! closed before the flow returns, whatever the outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use super::error::SyncError;
use super::fingerprint;
use super::host::{diff_title, DiffRequest, EditorHost, HostEvent, NoticeLevel, Prompt};
use super::staging::StagingArea;
use crate::config::{
    config_file, ConfigResolver, ConfigStorage, CredentialCache, PrefixMatch, RemoteContext,
    ResolvedTarget, DEFAULT_CONFIG_FILE,
};
use crate::session::{ComparisonSession, SessionSlot};
use crate::sftp::{ConnectParams, RemoteConnection, RemoteConnector};

const CONFIRM_UPLOAD: &str = "Saved. Upload to the server?";

/// Runtime options for the coordinator
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Config file path relative to the workspace root
    pub config_file: PathBuf,
    /// How context paths are matched against local files
    pub prefix_match: PrefixMatch,
    /// Prepended to every user notice
    pub notice_prefix: String,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            prefix_match: PrefixMatch::default(),
            notice_prefix: "[Safe SFTP]".to_string(),
        }
    }
}

/// Result of the upload command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Remote and local bytes match; nothing staged
    Identical { remote_path: String },
    /// Contents differ; a session is open and the diff was requested
    Staged(ComparisonSession),
}

/// Result of a save event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The saved document is not the session's local file (or no session)
    NotTracked,
    /// The user did not confirm
    Declined,
    Uploaded { remote_path: String },
}

pub struct UploadCoordinator {
    connector: Arc<dyn RemoteConnector>,
    credentials: Arc<CredentialCache>,
    session: Arc<SessionSlot>,
    staging: StagingArea,
    options: SyncOptions,
}

impl UploadCoordinator {
    pub fn new(
        connector: Arc<dyn RemoteConnector>,
        credentials: Arc<CredentialCache>,
        session: Arc<SessionSlot>,
        staging: StagingArea,
        options: SyncOptions,
    ) -> Self {
        Self {
            connector,
            credentials,
            session,
            staging,
            options,
        }
    }

    /// Coordinator with fresh state, a new staging directory and default options
    pub fn with_connector(connector: Arc<dyn RemoteConnector>) -> std::io::Result<Self> {
        Ok(Self::new(
            connector,
            Arc::new(CredentialCache::new()),
            Arc::new(SessionSlot::new()),
            StagingArea::new()?,
            SyncOptions::default(),
        ))
    }

    pub fn session(&self) -> &Arc<SessionSlot> {
        &self.session
    }

    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    pub fn staging(&self) -> &StagingArea {
        &self.staging
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Upload command on the host's active document
    pub async fn run_upload(&self, host: &dyn EditorHost) -> Result<CheckOutcome, SyncError> {
        let result = self.check_and_stage(host).await;
        match &result {
            Ok(CheckOutcome::Identical { remote_path }) => {
                info!("{} is identical on the server; skipping", remote_path);
                self.notify(host, NoticeLevel::Info, "Identical to the server. Upload skipped.");
            }
            Ok(CheckOutcome::Staged(session)) => {
                info!(
                    "Opened comparison {:?} <-> {}",
                    session.local_path, session.remote_path
                );
            }
            Err(e) => self.report(host, e),
        }
        result
    }

    /// Save event. Only the open session's local file triggers an upload.
    pub async fn on_document_saved(
        &self,
        host: &dyn EditorHost,
        saved: &Path,
    ) -> Result<ConfirmOutcome, SyncError> {
        let result = self.confirm_and_upload(host, saved).await;
        match &result {
            Ok(ConfirmOutcome::Uploaded { remote_path }) => {
                info!("Uploaded {:?} to {}", saved, remote_path);
                self.notify(host, NoticeLevel::Info, "Upload complete.");
            }
            Ok(ConfirmOutcome::Declined) => debug!("Upload of {:?} declined", saved),
            Ok(ConfirmOutcome::NotTracked) => {}
            Err(e) => self.report(host, e),
        }
        result
    }

    /// Close event. Closing the staged snapshot ends the session.
    pub fn on_document_closed(&self, host: &dyn EditorHost, closed: &Path) -> bool {
        match self.session.clear_if_staging(closed) {
            Some(session) => {
                info!("Diff closed; ended comparison for {:?}", session.local_path);
                self.notify(
                    host,
                    NoticeLevel::Info,
                    "Diff view closed. Comparison session ended.",
                );
                true
            }
            None => false,
        }
    }

    /// Dispatch a lifecycle event from the host
    pub async fn handle_event(&self, host: &dyn EditorHost, event: HostEvent) {
        match event {
            HostEvent::Saved(path) => {
                // Failures were already surfaced to the user
                let _ = self.on_document_saved(host, &path).await;
            }
            HostEvent::Closed(path) => {
                self.on_document_closed(host, &path);
            }
        }
    }

    /// Forget cached passwords and any open session
    pub fn shutdown(&self) {
        self.credentials.clear();
        if self.session.clear().is_some() {
            debug!("Dropped open comparison session on shutdown");
        }
    }

    async fn check_and_stage(&self, host: &dyn EditorHost) -> Result<CheckOutcome, SyncError> {
        let local = host.active_document().ok_or(SyncError::NoActiveDocument)?;
        let root = host.workspace_root().ok_or(SyncError::NoWorkspace)?;

        let contexts = ConfigStorage::with_path(config_file(&root, &self.options.config_file))
            .load()
            .await?;

        let target = ConfigResolver::new(self.options.prefix_match)
            .resolve(&local, &contexts, &root)
            .ok_or_else(|| SyncError::NoMatchingContext(local.clone()))?;

        let password = self.password_for(host, &target.context).await?;
        let params = ConnectParams::for_context(&target.context, password);

        let mut conn = self
            .connector
            .connect(&params)
            .await
            .map_err(SyncError::Connection)?;
        let result = self.compare_and_stage(conn.as_mut(), host, &local, target).await;
        conn.close().await;
        result
    }

    async fn compare_and_stage(
        &self,
        conn: &mut dyn RemoteConnection,
        host: &dyn EditorHost,
        local: &Path,
        target: ResolvedTarget,
    ) -> Result<CheckOutcome, SyncError> {
        let remote_bytes = conn
            .fetch(&target.remote_path)
            .await
            .map_err(SyncError::Transfer)?;
        let local_bytes = tokio::fs::read(local).await.map_err(SyncError::LocalRead)?;

        if fingerprint::equal(&remote_bytes, &local_bytes) {
            return Ok(CheckOutcome::Identical {
                remote_path: target.remote_path,
            });
        }

        let staging_path = self
            .staging
            .stage(local, &remote_bytes)
            .await
            .map_err(SyncError::Staging)?;

        let session = ComparisonSession {
            local_path: local.to_path_buf(),
            remote_path: target.remote_path,
            context: target.context,
            staging_path: staging_path.clone(),
        };
        self.session.replace(session.clone());

        host.show_diff(DiffRequest {
            left: staging_path,
            right: local.to_path_buf(),
            title: diff_title(local),
        })
        .await;

        Ok(CheckOutcome::Staged(session))
    }

    async fn confirm_and_upload(
        &self,
        host: &dyn EditorHost,
        saved: &Path,
    ) -> Result<ConfirmOutcome, SyncError> {
        let Some(session) = self.session.for_local(saved) else {
            return Ok(ConfirmOutcome::NotTracked);
        };

        let password = self.password_for(host, &session.context).await?;

        if host.confirm(CONFIRM_UPLOAD).await != Prompt::Value(true) {
            return Ok(ConfirmOutcome::Declined);
        }

        let params = ConnectParams::for_context(&session.context, password);
        let mut conn = self
            .connector
            .connect(&params)
            .await
            .map_err(SyncError::Connection)?;
        let stored = conn
            .store(saved, &session.remote_path)
            .await
            .map_err(SyncError::Transfer);
        conn.close().await;
        stored?;

        Ok(ConfirmOutcome::Uploaded {
            remote_path: session.remote_path,
        })
    }

    async fn password_for(
        &self,
        host: &dyn EditorHost,
        context: &RemoteContext,
    ) -> Result<Zeroizing<String>, SyncError> {
        let prompt = format!("[{}] Enter SFTP password", context.display_label());
        self.credentials
            .get_or_prompt(&context.server_identity(), || host.prompt_secret(&prompt))
            .await
            .into_value()
            .ok_or(SyncError::CredentialCancelled)
    }

    fn report(&self, host: &dyn EditorHost, err: &SyncError) {
        match err.notice() {
            Some((level, message)) => {
                warn!("Upload flow stopped: {}", err);
                self.notify(host, level, &message);
            }
            None => debug!("Upload flow skipped: {}", err),
        }
    }

    fn notify(&self, host: &dyn EditorHost, level: NoticeLevel, message: &str) {
        host.notify(level, &format!("{} {}", self.options.notice_prefix, message));
    }
}
