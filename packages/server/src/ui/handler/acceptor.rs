//! Accept loop turning inbound connections into sessions.

use std::{io, net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use relay_shared::time::now_millis;
use tokio::{
    io::AsyncRead,
    net::{TcpListener, tcp::OwnedReadHalf},
};
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{
    domain::{PeerWriter, PendingSession},
    infrastructure::transport::TcpPeerWriter,
    ui::state::AppState,
};

use super::connection::handle_connection;

/// One accepted connection, split into its read side and write handle
pub struct AcceptedConnection<R> {
    pub reader: R,
    pub writer: Arc<dyn PeerWriter>,
    pub peer_addr: SocketAddr,
}

/// Source of inbound connections
#[async_trait]
pub trait ConnectionSource: Send {
    type Reader: AsyncRead + Unpin + Send + 'static;

    /// Wait for the next connection
    async fn next_connection(&mut self) -> io::Result<AcceptedConnection<Self::Reader>>;
}

#[async_trait]
impl ConnectionSource for TcpListener {
    type Reader = OwnedReadHalf;

    async fn next_connection(&mut self) -> io::Result<AcceptedConnection<OwnedReadHalf>> {
        let (stream, peer_addr) = self.accept().await?;
        let (reader, writer) = stream.into_split();
        Ok(AcceptedConnection {
            reader,
            writer: Arc::new(TcpPeerWriter::new(writer)),
            peer_addr,
        })
    }
}

/// Accept connections until `cancel` fires or accepting fails.
///
/// An accept error ends this loop only; sessions already running are not affected.
/// The source (listener) is dropped, and so closed, when the loop returns.
pub async fn accept_loop<S>(
    mut source: S,
    state: Arc<AppState>,
    tasks: TaskTracker,
    cancel: CancellationToken,
) where
    S: ConnectionSource,
{
    loop {
        let accepted = tokio::select! {
            _ = cancel.cancelled() => break,
            result = source.next_connection() => result,
        };

        let connection = match accepted {
            Ok(connection) => connection,
            Err(e) => {
                tracing::error!("Error accepting new connection: {}", e);
                break;
            }
        };

        let peer_addr = connection.peer_addr;
        let pending = PendingSession::new(peer_addr, connection.writer, now_millis());

        let session = match state.connect_session_usecase.execute(pending).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Rejected connection from {}: {}", peer_addr, e);
                continue;
            }
        };

        tasks.spawn(handle_connection(
            Arc::clone(&state),
            session,
            connection.reader,
        ));
    }

    tracing::info!("Acceptor stopped");
}
