//! Inbound connection handlers.

pub mod acceptor;
pub mod connection;
