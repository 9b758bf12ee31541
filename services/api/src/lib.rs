//! Bolna MCP Bridge Library Crate
//!
//! Serves the Bolna tool catalog to remote MCP clients over Server-Sent
//! Events: configuration, application state, the session registry and SSE
//! bridge, the message endpoint, and routing. The `bolna-mcp` binary is a
//! thin wrapper around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod sse;
pub mod state;
