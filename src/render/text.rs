//! Plain-text rendering, oldest message first.

use std::fmt::Write;

use crate::log::Message;

/// Renders one `name: body` line per message in log order.
pub fn render_text(messages: &[Message]) -> String {
    messages.iter().fold(String::new(), |mut out, message| {
        // Writing to a String cannot fail
        let _ = writeln!(out, "{}", message);
        out
    })
}
