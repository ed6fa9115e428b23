//! UseCase layer
//!
//! Application operations composed from the domain interfaces.

mod broadcast_message;
mod connect_session;
mod disconnect_session;
mod shutdown_server;

pub use broadcast_message::{BroadcastMessageUseCase, BroadcastReport};
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use shutdown_server::ShutdownServerUseCase;
