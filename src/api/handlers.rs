//! API Handlers
//!
//! HTTP request handlers for each chat server endpoint.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse},
    Json,
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::debug;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::error::{LogError, Result};
use crate::gateway::LogGateway;
use crate::models::{HealthResponse, StatsResponse};
use crate::render::{render_html, render_text, DEV_FORM};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Reads and appends the message log
    pub gateway: LogGateway,
    /// The cache the log lives in, for statistics and cleanup
    pub cache: MemoryCache,
    /// Whether /dev serves the submit form
    pub dev_mode: bool,
}

impl AppState {
    /// Creates a new AppState over an in-process cache.
    pub fn new(cache: MemoryCache, config: &Config) -> Self {
        let gateway = LogGateway::from_config(Arc::new(cache.clone()), config);
        Self {
            gateway,
            cache,
            dev_mode: config.dev_mode,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Sizes the cache from the Config as well.
    pub fn from_config(config: &Config) -> Self {
        Self::new(MemoryCache::from_config(config), config)
    }
}

/// Handler for GET /, /messages and /messages.html
///
/// Renders the log as HTML, newest message first.
pub async fn messages_html_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let messages = state.gateway.read_all().await?;
    Ok(Html(render_html(&messages)))
}

/// Handler for GET /messages.txt
///
/// Renders the log as plain text, oldest message first.
pub async fn messages_text_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let messages = state.gateway.read_all().await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_text(&messages),
    ))
}

/// Handler for POST /messages
///
/// Appends the JSON message in the body. Replies 201 with no body.
pub async fn post_message_handler(
    State(state): State<AppState>,
    body: Body,
) -> Result<StatusCode> {
    let appended = match read_payload(body, state.gateway.max_content_size()).await {
        Ok(raw) => state.gateway.append(&raw).await,
        Err(e) => Err(e),
    };
    if let Err(e) = appended {
        if e.is_validation() {
            debug!(error = %e, "rejected message payload");
        }
        return Err(e);
    }
    Ok(StatusCode::CREATED)
}

/// Buffers at most `limit + 1` bytes of the request body.
///
/// One byte past the limit is enough for the gateway to see an oversized
/// payload, so longer bodies are cut off here.
async fn read_payload(body: Body, limit: usize) -> Result<Bytes> {
    let cutoff = limit.saturating_add(1);
    match Limited::new(body, cutoff).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            Err(LogError::PayloadTooLarge {
                size: cutoff,
                limit,
            })
        }
        Err(e) => Err(LogError::InvalidMessage(format!(
            "failed to read request body: {e}"
        ))),
    }
}

/// Handler for GET /dev
///
/// Serves the submit form, only when dev mode is on.
pub async fn dev_form_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Html<&'static str>> {
    if !state.dev_mode {
        return Err(LogError::NotFound(uri.path().to_string()));
    }
    Ok(Html(DEV_FORM))
}

/// Handler for GET /stats
///
/// Returns current statistics of the cache.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    Json(StatsResponse::new(&stats, state.gateway.capacity()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for every unknown path.
pub async fn not_found_handler(uri: Uri) -> LogError {
    LogError::NotFound(uri.path().to_string())
}
