//! Axum Handlers for the message endpoint
//!
//! Clients post one JSON-RPC message per request to `POST /messages/`. The
//! message is handed to the MCP service of the matching session; its reply is
//! delivered on that session's SSE stream, never in the POST response.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use rmcp::model::ClientJsonRpcMessage;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    models::{ErrorResponse, MessageQuery},
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse { message })).into_response()
            }
        }
    }
}

/// Accept one client message for an open session.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let session_id = query.session;

    let message: ClientJsonRpcMessage = serde_json::from_slice(&body).map_err(|e| {
        warn!(%session_id, error = %e, "Rejected unparseable client message");
        ApiError::BadRequest(format!("Could not parse message: {}", e))
    })?;

    let sender = state
        .sessions
        .sender(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Session '{}' not found", session_id)))?;

    if sender.send(message).await.is_err() {
        // The session's service has already shut down.
        state.sessions.remove(&session_id);
        return Err(ApiError::NotFound(format!(
            "Session '{}' is closed",
            session_id
        )));
    }

    debug!(%session_id, "Accepted client message");
    Ok(StatusCode::ACCEPTED)
}
