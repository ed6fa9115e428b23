//! Infrastructure layer
//!
//! Concrete implementations of the domain interfaces.

pub mod registry;
pub mod transport;
