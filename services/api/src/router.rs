//! Axum Router Configuration
//!
//! This module defines the HTTP routing for the bridge: the SSE stream
//! endpoint and the session-scoped message endpoint.

use crate::{handlers, sse::sse_handler, state::AppState};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sse", get(sse_handler))
        .route("/messages/", post(handlers::post_message))
        .route("/messages", post(handlers::post_message))
        .with_state(app_state)
}
