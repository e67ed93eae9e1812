//! Remote context configuration types
//!
//! Mirrors the workspace `sftp.json` document. Keys are camelCase on disk.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default SSH port used when a context omits `port` or sets it to 0
pub const DEFAULT_PORT: u16 = 22;

/// One configured mapping from a local subtree to a remote base path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContext {
    /// Display name used in prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Subpath relative to the workspace root (defaults to the root itself)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Remote host address
    pub host: String,

    /// SSH port (absent or 0 means 22)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Username for authentication
    pub username: String,

    /// POSIX base path on the server
    pub remote_path: String,
}

impl RemoteContext {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        remote_path: impl Into<String>,
    ) -> Self {
        Self {
            name: None,
            context: None,
            host: host.into(),
            port: None,
            username: username.into(),
            remote_path: remote_path.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Port actually dialed
    pub fn effective_port(&self) -> u16 {
        match self.port {
            None | Some(0) => DEFAULT_PORT,
            Some(port) => port,
        }
    }

    /// Key under which the password for this context is cached
    pub fn server_identity(&self) -> ServerIdentity {
        ServerIdentity::new(&self.host, self.effective_port())
    }

    /// Label shown in the password prompt: the name if configured, else the host
    pub fn display_label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.host)
    }
}

/// `host:port` key shared by every context pointing at the same server
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServerIdentity(String);

impl ServerIdentity {
    pub fn new(host: &str, port: u16) -> Self {
        Self(format!("{}:{}", host, port))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a context path is tested against a local file path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixMatch {
    /// Plain string prefix. `/ws/app` also matches `/ws/app2/x`.
    #[default]
    String,
    /// Whole path components only. `/ws/app` does not match `/ws/app2/x`.
    Segments,
}
