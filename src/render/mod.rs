//! Presentation Module
//!
//! Turns the message list into response bodies. Each renderer picks its own
//! display order; the log itself is always oldest first.
//!
//! # Renderers
//! - HTML: newest first, auto-reloading page
//! - Plain text: oldest first, one `name: body` line per message
//! - Dev form: static page for posting messages by hand

mod html;
mod text;

pub use html::{render_html, DEV_FORM};
pub use text::render_text;
