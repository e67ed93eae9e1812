//! SFTP transfer module
//!
//! Connects to a server, reads whole remote files, and overwrites them
//! with local content.

pub mod client;
pub mod config;
pub mod error;
pub mod path_utils;
pub mod session;
pub mod transport;

pub use client::{ClientHandler, SftpConnector};
pub use config::ConnectParams;
pub use error::SftpError;
pub use session::SftpSession;
pub use transport::{RemoteConnection, RemoteConnector};
