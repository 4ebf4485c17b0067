//! Error types for lcu-bridge.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for lcu-bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot server could not bind its listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Host/port pair does not form a socket address.
    #[error("invalid listen address: {0}")]
    InvalidAddress(String),

    /// The snapshot server stopped serving.
    #[error("snapshot server error: {0}")]
    Server(String),

    /// The event feed could not be read.
    #[error("event feed error: {0}")]
    Feed(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Convenience Result type for lcu-bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
