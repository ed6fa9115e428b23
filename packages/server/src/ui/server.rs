//! Server execution logic.

use std::{
    future::Future,
    io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::usecase::{
    BroadcastMessageUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
    ShutdownServerUseCase,
};

use super::{handler::acceptor::accept_loop, signal::shutdown_signal, state::AppState};

/// Server errors
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding the listening socket failed
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The bound listener could not report its address
    #[error("failed to read listener address: {0}")]
    LocalAddr(#[source] io::Error),
}

/// TCP chat relay server
///
/// This struct encapsulates the server's use cases and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     broadcast_message_usecase,
///     disconnect_session_usecase,
///     shutdown_server_usecase,
/// );
/// server.run("127.0.0.1".parse()?, 5555).await?;
/// ```
pub struct Server {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// BroadcastMessageUseCase（メッセージ中継のユースケース）
    broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// ShutdownServerUseCase（シャットダウンのユースケース）
    shutdown_server_usecase: Arc<ShutdownServerUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        shutdown_server_usecase: Arc<ShutdownServerUseCase>,
    ) -> Self {
        Self {
            connect_session_usecase,
            broadcast_message_usecase,
            disconnect_session_usecase,
            shutdown_server_usecase,
        }
    }

    /// Run the relay server until Ctrl+C / SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The address to bind to (e.g., 127.0.0.1)
    /// * `port` - The port number to bind to (e.g., 5555)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address.
    pub async fn run(self, host: IpAddr, port: u16) -> Result<(), ServerError> {
        let addr = SocketAddr::new(host, port);
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("Press Ctrl+C to shutdown gracefully");
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve connections on an already bound listener until `signal` resolves
    ///
    /// On shutdown every session is closed first, then the listener, and this
    /// method returns once every receive loop and the acceptor have finished.
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

        let state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            broadcast_message_usecase: self.broadcast_message_usecase,
            disconnect_session_usecase: self.disconnect_session_usecase,
            shutdown_server_usecase: self.shutdown_server_usecase,
        });

        let tasks = TaskTracker::new();
        let acceptor_cancel = CancellationToken::new();
        tasks.spawn(accept_loop(
            listener,
            Arc::clone(&state),
            tasks.clone(),
            acceptor_cancel.clone(),
        ));

        tracing::info!(
            "Server started on {}. Waiting for connections...",
            local_addr
        );

        signal.await;

        state.shutdown_server_usecase.execute().await;
        acceptor_cancel.cancel();

        tasks.close();
        tasks.wait().await;

        tracing::info!("Server has been shut down.");

        Ok(())
    }
}
