//! Outbound side of a session's connection.

use async_trait::async_trait;

use super::TransportError;

/// Write handle of one client connection
///
/// Broadcasts hold this through an `Arc`, so implementations serialize
/// concurrent writers internally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeerWriter: Send + Sync {
    /// Write the whole payload to the peer
    async fn write_payload(&self, payload: &[u8]) -> Result<(), TransportError>;

    /// Close the handle. Calling this more than once is a no-op.
    async fn close(&self);
}
