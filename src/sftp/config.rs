//! SFTP connection parameters

use std::fmt;

use zeroize::Zeroizing;

use crate::config::RemoteContext;

/// Everything needed to open one authenticated SFTP connection
#[derive(Clone)]
pub struct ConnectParams {
    /// Remote host address
    pub host: String,
    /// SSH port
    pub port: u16,
    /// Username for authentication
    pub username: String,
    /// Password, wiped from memory on drop
    pub password: Zeroizing<String>,
}

impl ConnectParams {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: Zeroizing<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            password,
        }
    }

    /// Parameters for a configured context and a resolved password
    pub fn for_context(context: &RemoteContext, password: Zeroizing<String>) -> Self {
        Self::new(
            context.host.clone(),
            context.effective_port(),
            context.username.clone(),
            password,
        )
    }

    /// `host:port` address to dial
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ConnectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_context_uses_default_port() {
        let ctx = RemoteContext::new("h1", "deploy", "/srv");
        let params = ConnectParams::for_context(&ctx, Zeroizing::new("pw".to_string()));
        assert_eq!(params.port, 22);
        assert_eq!(params.address(), "h1:22");
        assert_eq!(params.username, "deploy");
    }

    #[test]
    fn test_debug_redacts_password() {
        let params = ConnectParams::new("h1", 22, "u", Zeroizing::new("s3cret".to_string()));
        let debug = format!("{:?}", params);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("<redacted>"));
    }
}
