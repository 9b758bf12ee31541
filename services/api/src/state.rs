//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the shared upstream
//! client and the registry of open SSE sessions.

use crate::sse::registry::SessionRegistry;
use bolna_core::upstream::BolnaApi;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn BolnaApi>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(api: Arc<dyn BolnaApi>) -> Self {
        Self {
            api,
            sessions: Arc::new(SessionRegistry::default()),
        }
    }
}
