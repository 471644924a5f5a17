//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Removes expired entries from the in-process cache
//!   at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;
