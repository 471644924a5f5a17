//! Message Module
//!
//! A single chat line: who sent it and what they said.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

// == Message ==
/// One posted message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender name
    pub name: String,
    /// Message content
    pub body: String,
}

impl Message {
    // == Constructor ==
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }

    // == Decode ==
    /// Decodes a message from a raw JSON payload.
    ///
    /// The payload must be a JSON object with string fields `name` and
    /// `body`. Either may be empty. Extra fields are ignored.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_slice(raw)
            .map_err(|e| LogError::InvalidMessage(e.to_string()))?;

        // Structs also deserialize from JSON arrays; only objects are messages.
        if !value.is_object() {
            return Err(LogError::InvalidMessage(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value).map_err(|e| LogError::InvalidMessage(e.to_string()))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.body)
    }
}
