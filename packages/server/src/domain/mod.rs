//! Domain layer
//!
//! Session entity, receive-loop state machine and the interfaces
//! (`SessionRegistry`, `PeerWriter`) implemented by the infrastructure layer.

mod error;
mod registry;
mod session;
mod state;
mod writer;

pub use error::{RegistryError, TransportError};
pub use registry::SessionRegistry;
pub use session::{DisplayName, PendingSession, Session, SessionId};
pub use state::{DisconnectReason, ReceiveEvent, SessionState, Transition};
pub use writer::PeerWriter;

#[cfg(test)]
pub use writer::MockPeerWriter;
