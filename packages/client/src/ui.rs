//! UI utilities for the client.

use std::io::Write;

/// Prompt shown while waiting for the display name
pub const NAME_PROMPT: &str = "Name: ";
/// Prompt shown for chat messages
pub const MESSAGE_PROMPT: &str = "> ";

/// Print a relayed chunk followed by the prompt again
pub fn print_received<W: Write>(out: &mut W, chunk: &[u8]) {
    let _ = write!(out, "\n{}\n{}", String::from_utf8_lossy(chunk), MESSAGE_PROMPT);
    let _ = out.flush();
}
