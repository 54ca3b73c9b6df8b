//! Error types for SatlinkIO

use crate::protocol::DecodeError;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// SatlinkIO error types
///
/// `Bind` is the only fatal variant: it aborts startup before any loop runs.
/// `Decode` stays contained inside the receive loop; `Dispatch` is returned to
/// the command caller with no automatic retry.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Could not bind the telemetry ingest socket
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Requested bind address
        addr: String,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Datagram failed to decode
    #[error("Frame decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Outbound command could not be sent
    #[error("Command dispatch failed: {0}")]
    Dispatch(#[source] std::io::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file parse error
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration file write error
    #[error("Config write error: {0}")]
    ConfigEncode(#[from] toml::ser::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
