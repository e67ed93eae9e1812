//! Configuration Management Module
//!
//! Loads the workspace SFTP contexts, maps local files to remote paths,
//! and caches passwords for the lifetime of the process.

pub mod credentials;
pub mod resolver;
pub mod storage;
pub mod types;

pub use credentials::CredentialCache;
pub use resolver::{ConfigResolver, ResolvedTarget};
pub use storage::{config_file, parse_contexts, ConfigError, ConfigStorage, DEFAULT_CONFIG_FILE};
pub use types::{PrefixMatch, RemoteContext, ServerIdentity, DEFAULT_PORT};
