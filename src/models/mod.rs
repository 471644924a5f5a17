//! Response models for the chat server API
//!
//! JSON bodies for the operational endpoints and for errors.

pub mod responses;

// Re-export commonly used types
pub use responses::{ErrorResponse, HealthResponse, StatsResponse};
