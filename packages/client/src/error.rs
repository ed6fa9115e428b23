//! Error types for the relay client.

use std::{io, net::SocketAddr};

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the server
    #[error("Could not make connection to server at {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// Connection error after the session started
    #[error("Connection error: {0}")]
    Connection(#[from] io::Error),
}
