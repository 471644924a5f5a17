//! Bounded Log
//!
//! Pure append over a size-capped, oldest-first message sequence.

use std::num::NonZeroUsize;

use crate::log::Message;

// == Bounded Log ==
/// Append policy for a log that keeps only the most recent messages.
///
/// Holds no messages itself: the log lives in the cache, this type only
/// computes the next version of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedLog {
    capacity: NonZeroUsize,
}

impl BoundedLog {
    // == Constructor ==
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    /// Returns the maximum number of messages kept.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    // == Append ==
    /// Produces the log that results from adding `incoming` to `current`.
    ///
    /// `None` means no log exists yet, and yields `[incoming]`. Otherwise the
    /// message goes last and the oldest entries are dropped until at most
    /// `capacity` remain. The input is assumed valid; this never fails.
    pub fn append(&self, current: Option<Vec<Message>>, incoming: Message) -> Vec<Message> {
        let Some(mut messages) = current else {
            return vec![incoming];
        };

        messages.push(incoming);
        let cap = self.capacity.get();
        if messages.len() > cap {
            let excess = messages.len() - cap;
            messages.drain(..excess);
        }
        messages
    }
}

impl Default for BoundedLog {
    fn default() -> Self {
        // DEFAULT_CAPACITY is a non-zero constant
        Self::new(NonZeroUsize::new(super::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}
