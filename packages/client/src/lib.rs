//! TCP chat relay client library.
//!
//! Streams typed lines to the relay server and prints everything it relays back.

mod domain;
mod error;
mod session;
mod ui;

pub use domain::is_quit_command;
pub use error::ClientError;
pub use session::{READ_BUFFER_SIZE, SendOutcome, receive_loop, run_client, send_loop};
