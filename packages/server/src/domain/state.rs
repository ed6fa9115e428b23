//! Receive-loop state machine of a session.
//!
//! Pure logic with no I/O: the connection handler feeds every read outcome in
//! and performs the returned transition.
//!
//! ```text
//! AwaitingName --Data--> Active --Data--> Active
//!      |                   |
//!      +--Closed/Failed/Cancelled--+--> Disconnected (terminal)
//! ```

use std::fmt;

use super::DisplayName;

/// Session receive-loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// The next non-empty payload is the display name
    #[default]
    AwaitingName,
    /// Payloads are relayed to every other session
    Active,
    /// Terminal
    Disconnected,
}

/// Outcome of one read on the connection
#[derive(Debug, PartialEq, Eq)]
pub enum ReceiveEvent<'a> {
    Data(&'a [u8]),
    /// Zero-length read: the peer closed gracefully
    Closed,
    Failed(String),
    /// The session was closed from outside (shutdown or unregister)
    Cancelled,
}

/// Why a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    PeerClosed,
    TransportError(String),
    Shutdown,
}

impl fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PeerClosed => f.write_str("peer closed the connection"),
            Self::TransportError(e) => write!(f, "transport error: {}", e),
            Self::Shutdown => f.write_str("server shutdown"),
        }
    }
}

/// Action the handler has to perform after an event
#[derive(Debug, PartialEq, Eq)]
pub enum Transition<'a> {
    /// Store the display name; nothing is relayed
    Named(DisplayName),
    /// Relay the payload verbatim
    Relay(&'a [u8]),
    /// Leave the registry, close the connection and stop the loop
    Disconnect(DisconnectReason),
    Ignore,
}

impl SessionState {
    /// Apply one receive event and return the action to perform.
    pub fn on_event<'a>(&mut self, event: ReceiveEvent<'a>) -> Transition<'a> {
        if *self == Self::Disconnected {
            return Transition::Ignore;
        }

        let reason = match event {
            ReceiveEvent::Data(payload) if payload.is_empty() => return Transition::Ignore,
            ReceiveEvent::Data(payload) => {
                return match *self {
                    Self::AwaitingName => {
                        *self = Self::Active;
                        Transition::Named(DisplayName::from_payload(payload))
                    }
                    _ => Transition::Relay(payload),
                };
            }
            ReceiveEvent::Closed => DisconnectReason::PeerClosed,
            ReceiveEvent::Failed(e) => DisconnectReason::TransportError(e),
            ReceiveEvent::Cancelled => DisconnectReason::Shutdown,
        };

        *self = Self::Disconnected;
        Transition::Disconnect(reason)
    }
}
