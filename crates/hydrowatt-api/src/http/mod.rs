//! HTTP layer for Hydrowatt.
//!
//! Axum routes under `/api/v1/`: a streaming assistant endpoint (SSE) and
//! the current context, with envelope-formatted JSON responses and CORS.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
