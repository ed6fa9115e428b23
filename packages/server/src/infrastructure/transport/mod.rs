//! Connection handle implementations.

pub mod tcp;

pub use tcp::TcpPeerWriter;
