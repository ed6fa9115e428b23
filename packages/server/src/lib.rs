//! TCP chat relay server library.
//!
//! Accepts TCP connections, keeps one lightweight session per connection and
//! forwards every payload received from one session to all other sessions.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
