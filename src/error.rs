//! Error types for the chat server
//!
//! Two layers, both built with thiserror:
//! - [`CacheError`] is what a [`SnapshotCache`](crate::cache::SnapshotCache) reports.
//! - [`LogError`] is what the gateway and the HTTP handlers surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Failures reported by the cache collaborator.
///
/// A cache miss is not an error: `fetch` returns `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The version token presented to a compare-and-swap is stale,
    /// or the entry disappeared since it was fetched
    #[error("version conflict")]
    VersionConflict,

    /// The cache refused the request (key or value out of bounds)
    #[error("invalid cache request: {0}")]
    InvalidRequest(String),

    /// The cache could not serve the request
    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

// == Log Error Enum ==
/// Unified error type for the gateway and the HTTP surface.
#[derive(Error, Debug)]
pub enum LogError {
    /// The raw payload exceeds the configured byte limit.
    ///
    /// `size` is a lower bound when the body was cut off while reading.
    #[error("Request body is too big: at least {size} bytes (limit {limit})")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The payload is not a well-formed message
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Another writer replaced the snapshot between fetch and store
    #[error("Could not store the message: the log was modified concurrently")]
    VersionConflict,

    /// Fetch or store failed for a reason other than a miss or a conflict
    #[error("Cache error: {0}")]
    CacheUnavailable(String),

    /// No route for the requested path
    #[error("Not found: {0}")]
    NotFound(String),
}

impl LogError {
    /// HTTP status reported for this error.
    ///
    /// A version conflict is reported as a bad request, the same way the
    /// size and decode failures are.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LogError::PayloadTooLarge { .. } => StatusCode::BAD_REQUEST,
            LogError::InvalidMessage(_) => StatusCode::BAD_REQUEST,
            LogError::VersionConflict => StatusCode::BAD_REQUEST,
            LogError::CacheUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LogError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// True for errors the client caused and should not resend unchanged.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LogError::PayloadTooLarge { .. } | LogError::InvalidMessage(_)
        )
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the chat server.
pub type Result<T> = std::result::Result<T, LogError>;
