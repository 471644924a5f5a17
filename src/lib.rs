//! Chat Server - a tiny shared message log
//!
//! Keeps the most recent messages as one value in a volatile cache and
//! appends to it with a single compare-and-swap per request.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod log;
pub mod models;
pub mod render;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use gateway::{AppendOutcome, LogGateway};
pub use tasks::spawn_cleanup_task;
