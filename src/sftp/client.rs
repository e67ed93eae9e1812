//! SSH client for SFTP transfers using russh

use std::sync::Arc;

use async_trait::async_trait;
use russh::client;
use russh::keys::{PublicKey, PublicKeyBase64};
use tracing::{debug, info};

use super::config::ConnectParams;
use super::error::SftpError;
use super::session::SftpSession;
use super::transport::{RemoteConnection, RemoteConnector};
use crate::sync::fingerprint::fingerprint;

/// Opens password-authenticated SFTP sessions over russh
#[derive(Debug, Clone, Default)]
pub struct SftpConnector;

impl SftpConnector {
    pub fn new() -> Self {
        Self
    }

    /// Connect, authenticate and start the SFTP subsystem
    pub async fn open(&self, params: &ConnectParams) -> Result<SftpSession, SftpError> {
        let addr = params.address();
        info!("Connecting to SFTP server at {}", addr);

        let socket_addr = tokio::net::lookup_host(&addr)
            .await
            .map_err(|e| SftpError::ConnectionFailed(format!("Failed to resolve address: {}", e)))?
            .next()
            .ok_or_else(|| SftpError::ConnectionFailed("No address found".to_string()))?;

        // No inactivity timeout: a stalled server stalls the caller
        let ssh_config = client::Config {
            inactivity_timeout: None,
            ..Default::default()
        };

        let handler = ClientHandler::new(params.host.clone(), params.port);

        let mut handle = client::connect(Arc::new(ssh_config), socket_addr, handler)
            .await
            .map_err(|e| SftpError::ConnectionFailed(e.to_string()))?;

        debug!("SSH handshake completed");

        let authenticated = handle
            .authenticate_password(&params.username, params.password.as_str())
            .await
            .map_err(|e| SftpError::AuthenticationFailed(e.to_string()))?;

        if !authenticated.success() {
            let _ = handle
                .disconnect(russh::Disconnect::ByApplication, "Authentication failed", "en")
                .await;
            return Err(SftpError::AuthenticationFailed(
                "Authentication rejected by server".to_string(),
            ));
        }

        info!("SSH authentication successful for {}@{}", params.username, addr);

        SftpSession::open(handle, addr).await
    }
}

#[async_trait]
impl RemoteConnector for SftpConnector {
    async fn connect(
        &self,
        params: &ConnectParams,
    ) -> Result<Box<dyn RemoteConnection>, SftpError> {
        Ok(Box::new(self.open(params).await?))
    }
}

/// Client handler for russh callbacks
///
/// Server keys are accepted and their SHA-256 fingerprint is logged.
pub struct ClientHandler {
    host: String,
    port: u16,
}

impl ClientHandler {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }
}

impl client::Handler for ClientHandler {
    type Error = SftpError;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        let digest = fingerprint(&server_public_key.public_key_bytes());
        info!(
            "Accepting host key for {}:{} (SHA256 {})",
            self.host, self.port, digest
        );
        Ok(true)
    }
}
