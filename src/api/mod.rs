//! API Module
//!
//! HTTP handlers and routing for the chat server.
//!
//! # Endpoints
//! - `GET /`, `/messages`, `/messages.html` - Message page, newest first
//! - `GET /messages.txt` - Messages as plain text, oldest first
//! - `POST /messages` - Post a message
//! - `GET /dev` - Submit form (dev mode only)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
