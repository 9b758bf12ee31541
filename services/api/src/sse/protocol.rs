//! Framing of server-to-client messages as Server-Sent Events.

use super::registry::SessionId;
use axum::response::sse::Event;
use rmcp::model::ServerJsonRpcMessage;

/// Path clients post their JSON-RPC messages to.
pub const MESSAGES_PATH: &str = "/messages/";

/// Event announcing where the client should post messages for its session.
pub const ENDPOINT_EVENT: &str = "endpoint";

/// Event carrying one JSON-RPC message from the server.
pub const MESSAGE_EVENT: &str = "message";

/// The session-scoped URL advertised in the `endpoint` event.
pub fn session_endpoint(session_id: SessionId) -> String {
    format!("{}?session={}", MESSAGES_PATH, session_id.simple())
}

pub fn endpoint_event(session_id: SessionId) -> Event {
    Event::default()
        .event(ENDPOINT_EVENT)
        .data(session_endpoint(session_id))
}

pub fn message_event(message: &ServerJsonRpcMessage) -> Result<Event, axum::Error> {
    Event::default().event(MESSAGE_EVENT).json_data(message)
}
