//! Session registry interface.

use std::sync::Arc;

use async_trait::async_trait;

use super::{PendingSession, RegistryError, Session, SessionId};

/// Shared collection of live sessions
///
/// Every operation runs under one lock held only for collection mutation,
/// never across network I/O.
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Assign the next id to the pending session and append it.
    ///
    /// Fails with `RegistryError::Closed` once `close_all` has run.
    async fn register(&self, pending: PendingSession) -> Result<Arc<Session>, RegistryError>;

    /// Remove the session and mark it closed.
    ///
    /// Returns `false` when the session was already absent.
    async fn unregister(&self, id: SessionId) -> bool;

    /// Point-in-time copy of the live sessions in registration order
    async fn snapshot(&self) -> Vec<Arc<Session>>;

    /// Drain every session, mark each closed and refuse further registrations
    async fn close_all(&self) -> Vec<Arc<Session>>;

    /// Number of live sessions
    async fn count(&self) -> usize;
}
