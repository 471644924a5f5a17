//! API Routes
//!
//! Configures the Axum router with all chat server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    dev_form_handler, health_handler, messages_html_handler, messages_text_handler,
    not_found_handler, post_message_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /`, `/messages`, `/messages.html` - Log as HTML, newest first
/// - `GET /messages.txt` - Log as plain text, oldest first
/// - `POST /messages` - Append a message
/// - `GET /dev` - Submit form (dev mode only)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// `GET` routes answer `HEAD` too. Unknown paths, and `POST` anywhere but
/// `/messages`, get a 404 JSON error.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(messages_html_handler).post(not_found_handler))
        .route(
            "/messages",
            get(messages_html_handler).post(post_message_handler),
        )
        .route(
            "/messages.html",
            get(messages_html_handler).post(not_found_handler),
        )
        .route("/messages.txt", get(messages_text_handler))
        .route("/dev", get(dev_form_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
