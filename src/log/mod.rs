//! Bounded Log Module
//!
//! The message type, the cached snapshot of the log, and the size-capped
//! append that produces the next snapshot.

mod bounded;
mod message;
mod snapshot;


// Re-export public types
pub use bounded::BoundedLog;
pub use message::Message;
pub use snapshot::{decode_messages, encode_messages, LogSnapshot};

// == Public Constants ==
/// Number of messages kept when no capacity is configured
pub const DEFAULT_CAPACITY: usize = 50;

/// Maximum accepted size of a raw message payload in bytes
pub const MAX_CONTENT_SIZE: usize = 256;

/// Cache key the log is stored under when none is configured
pub const DEFAULT_MESSAGES_KEY: &str = "messages";
