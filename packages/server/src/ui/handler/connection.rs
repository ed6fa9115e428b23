//! Per-session receive loop.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    domain::{ReceiveEvent, Session, SessionState, Transition},
    ui::state::AppState,
};

/// Size of the buffer handed to each read; one read is one relayed payload
pub const READ_BUFFER_SIZE: usize = 1024;

/// Run the receive loop of one session until it disconnects.
///
/// Every read races against the session's close signal, so shutdown or an
/// external unregister stops the loop even while it is blocked on the socket.
pub async fn handle_connection<R>(state: Arc<AppState>, session: Arc<Session>, mut reader: R)
where
    R: AsyncRead + Unpin,
{
    let mut machine = SessionState::default();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    loop {
        let read = tokio::select! {
            biased;
            _ = session.closed() => None,
            result = reader.read(&mut buf) => Some(result),
        };

        let event = match read {
            None => ReceiveEvent::Cancelled,
            Some(Ok(0)) => ReceiveEvent::Closed,
            Some(Ok(n)) => ReceiveEvent::Data(&buf[..n]),
            Some(Err(e)) => {
                tracing::error!(session_id = %session.id(), "Error: {}", e);
                ReceiveEvent::Failed(e.to_string())
            }
        };

        match machine.on_event(event) {
            Transition::Named(name) => {
                tracing::info!(
                    session_id = %session.id(),
                    name = %name,
                    "Session has set their name to {}",
                    name
                );
                session.set_display_name(name).await;
            }
            Transition::Relay(payload) => {
                let name = session.display_name().await;
                tracing::info!(
                    session_id = %session.id(),
                    name = %name,
                    "{}",
                    String::from_utf8_lossy(payload)
                );
                // closing the session abandons a broadcast stuck on a stalled peer
                tokio::select! {
                    biased;
                    _ = session.closed() => {}
                    _ = state.broadcast_message_usecase.execute(&session, payload) => {}
                }
            }
            Transition::Disconnect(reason) => {
                state
                    .disconnect_session_usecase
                    .execute(&session, reason)
                    .await;
                break;
            }
            Transition::Ignore => {}
        }
    }
}
