//! Domain error types.

use thiserror::Error;

/// Errors raised while writing to a session's connection
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection handle has already been closed
    #[error("connection is closed")]
    Closed,

    /// Underlying socket error
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the session registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry has been shut down and no longer accepts sessions
    #[error("registry is closed")]
    Closed,
}
