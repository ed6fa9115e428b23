//! TCP relay server implementation.

mod handler;
mod server;
mod signal;
pub mod state;

pub use handler::connection::READ_BUFFER_SIZE;
pub use server::{Server, ServerError};
pub use signal::shutdown_signal;
