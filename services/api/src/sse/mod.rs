//! SSE Session Bridge
//!
//! Serves the Bolna MCP tools over the two-endpoint SSE transport:
//!
//! - `registry`: maps session ids to the inbound channel of each open session.
//! - `protocol`: frames server messages and the endpoint announcement as SSE events.
//! - `session`: the `GET /sse` handler that opens, runs and closes a session.
//!
//! Client messages arrive through `POST /messages/` (see [`crate::handlers`]).

pub mod protocol;
pub mod registry;
pub mod session;

pub use session::sse_handler;
