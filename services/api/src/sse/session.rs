//! Manages the lifecycle of one SSE session: allocation, the MCP service
//! serving it, and cleanup on disconnect.
//!
//! The first message a session accepts must be `initialize`. Anything else
//! is still acknowledged with 202, but the service refuses the handshake and
//! ends; the stream then closes without a reply and the session is
//! unregistered, so later posts to it get 404.

use super::{
    protocol::{endpoint_event, message_event},
    registry::SessionGuard,
};
use crate::state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use bolna_core::tools::BolnaService;
use futures::{Stream, StreamExt, stream};
use rmcp::{
    ServiceExt,
    model::{ClientJsonRpcMessage, ServerJsonRpcMessage},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::PollSender;
use tracing::{Instrument, error, info, warn};

/// Buffered messages per direction for a single session.
const CHANNEL_CAPACITY: usize = 64;

/// Axum handler for `GET /sse`.
///
/// Registers a new session, starts a dedicated [`BolnaService`] over an
/// in-process channel transport, and streams its replies back. The first
/// event tells the client where to post messages for this session.
pub async fn sse_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let (inbound_tx, inbound_rx) = mpsc::channel::<ClientJsonRpcMessage>(CHANNEL_CAPACITY);
    let (outbound_tx, outbound_rx) = mpsc::channel::<ServerJsonRpcMessage>(CHANNEL_CAPACITY);

    let session_id = state.sessions.register(inbound_tx);
    let guard = SessionGuard::new(session_id, state.sessions.clone());
    info!(%session_id, "SSE session opened");

    let service = BolnaService::new(state.api.clone());
    let transport = (
        PollSender::new(outbound_tx),
        ReceiverStream::new(inbound_rx),
    );
    let session_span = tracing::info_span!("sse_session", %session_id);
    tokio::spawn(
        async move {
            match service.serve(transport).await {
                Ok(running) => {
                    info!("MCP session initialized");
                    if let Err(e) = running.waiting().await {
                        error!(error = %e, "MCP session task failed");
                    }
                }
                Err(e) => warn!(error = ?e, "MCP session ended before initialization"),
            }
            info!("MCP session finished");
        }
        .instrument(session_span),
    );

    let endpoint = stream::iter([Ok::<_, axum::Error>(endpoint_event(session_id))]);
    // The guard lives as long as the response stream; dropping the stream on
    // disconnect unregisters the session.
    let messages = ReceiverStream::new(outbound_rx).map(move |message| {
        let _session = &guard;
        message_event(&message)
    });

    Sse::new(endpoint.chain(messages)).keep_alive(KeepAlive::default())
}
