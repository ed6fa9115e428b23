//! Server state shared by the acceptor and every connection handler.

use std::sync::Arc;

use crate::usecase::{
    BroadcastMessageUseCase, ConnectSessionUseCase, DisconnectSessionUseCase,
    ShutdownServerUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// BroadcastMessageUseCase（メッセージ中継のユースケース）
    pub broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// ShutdownServerUseCase（シャットダウンのユースケース）
    pub shutdown_server_usecase: Arc<ShutdownServerUseCase>,
}
