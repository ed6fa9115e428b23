//! Session entity and its value objects.

use std::{
    fmt,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::RwLock;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

use super::PeerWriter;

/// Session identifier
///
/// Assigned by the registry, strictly increasing and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name chosen by the client
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayName {
    /// No name received yet
    #[default]
    Unset,
    Named(String),
}

impl DisplayName {
    /// Build a name from the first payload of a session.
    ///
    /// The bytes are decoded lossily and trimmed; a blank payload yields `Unset`.
    pub fn from_payload(payload: &[u8]) -> Self {
        let text = String::from_utf8_lossy(payload);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Unset
        } else {
            Self::Named(trimmed.to_string())
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("<unnamed>"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Accepted connection that has not been registered yet
pub struct PendingSession {
    pub peer_addr: SocketAddr,
    pub writer: Arc<dyn PeerWriter>,
    /// Unix timestamp when accepted (UTC, milliseconds)
    pub connected_at: i64,
}

impl PendingSession {
    pub fn new(peer_addr: SocketAddr, writer: Arc<dyn PeerWriter>, connected_at: i64) -> Self {
        Self {
            peer_addr,
            writer,
            connected_at,
        }
    }
}

/// A registered client connection
///
/// Shared between the registry, its own receive loop and in-flight broadcasts.
/// Liveness is true exactly while the session is in the registry.
pub struct Session {
    id: SessionId,
    peer_addr: SocketAddr,
    connected_at: i64,
    name: RwLock<DisplayName>,
    alive: AtomicBool,
    cancel: CancellationToken,
    writer: Arc<dyn PeerWriter>,
}

impl Session {
    /// Only the registry creates sessions, under its lock.
    pub(crate) fn register(id: SessionId, pending: PendingSession) -> Self {
        Self {
            id,
            peer_addr: pending.peer_addr,
            connected_at: pending.connected_at,
            name: RwLock::new(DisplayName::Unset),
            alive: AtomicBool::new(true),
            cancel: CancellationToken::new(),
            writer: pending.writer,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn connected_at(&self) -> i64 {
        self.connected_at
    }

    pub async fn display_name(&self) -> DisplayName {
        self.name.read().await.clone()
    }

    pub async fn set_display_name(&self, name: DisplayName) {
        *self.name.write().await = name;
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn writer(&self) -> &Arc<dyn PeerWriter> {
        &self.writer
    }

    /// Mark the session dead and wake its receive loop.
    ///
    /// Returns `true` only for the call that performed the transition.
    pub fn close(&self) -> bool {
        let was_alive = self.alive.swap(false, Ordering::AcqRel);
        if was_alive {
            self.cancel.cancel();
        }
        was_alive
    }

    /// Resolves once `close` has been called
    pub fn closed(&self) -> WaitForCancellationFuture<'_> {
        self.cancel.cancelled()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("peer_addr", &self.peer_addr)
            .field("alive", &self.is_alive())
            .finish_non_exhaustive()
    }
}
