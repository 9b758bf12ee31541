//! Bolna Core
//!
//! The upstream HTTP client for the Bolna voice-agent API, the catalog of
//! operations it exposes, and the MCP tool service that serves them.

pub mod agent_config;
pub mod catalog;
pub mod tools;
pub mod upstream;

/// Base URL of the hosted Bolna REST API.
pub const DEFAULT_BOLNA_API_URL: &str = "https://api.bolna.ai/v2";
