//! Session registry mapping each open SSE stream to its inbound channel.

use rmcp::model::ClientJsonRpcMessage;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

pub type SessionId = Uuid;

/// Delivers posted client messages to the MCP service of one session.
pub type InboundSender = mpsc::Sender<ClientJsonRpcMessage>;

/// All currently open sessions. An entry exists exactly as long as the
/// session's SSE stream is alive.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, InboundSender>>,
}

impl SessionRegistry {
    /// Allocates a fresh session id for `inbound` and registers it.
    pub fn register(&self, inbound: InboundSender) -> SessionId {
        let id = Uuid::new_v4();
        self.write().insert(id, inbound);
        id
    }

    pub fn sender(&self, id: &SessionId) -> Option<InboundSender> {
        self.read().get(id).cloned()
    }

    /// Returns whether an entry was removed.
    pub fn remove(&self, id: &SessionId) -> bool {
        self.write().remove(id).is_some()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Critical sections never panic, so a poisoned lock still holds a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<SessionId, InboundSender>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<SessionId, InboundSender>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes a session from the registry when dropped.
///
/// Owned by the session's outbound SSE stream, so the entry disappears as
/// soon as the client disconnects and the server drops the response body.
pub struct SessionGuard {
    id: SessionId,
    registry: Arc<SessionRegistry>,
}

impl SessionGuard {
    pub fn new(id: SessionId, registry: Arc<SessionRegistry>) -> Self {
        Self { id, registry }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.registry.remove(&self.id) {
            info!(session_id = %self.id, "SSE session closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ping() -> ClientJsonRpcMessage {
        serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" })).unwrap()
    }

    #[test]
    fn test_register_allocates_unique_ids() {
        let registry = SessionRegistry::default();
        let (tx, _rx) = mpsc::channel(1);

        let first = registry.register(tx.clone());
        let second = registry.register(tx);

        assert_ne!(first, second);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&first));
        assert!(registry.contains(&second));
    }

    #[tokio::test]
    async fn test_sender_routes_to_the_registered_channel() {
        let registry = SessionRegistry::default();
        let (tx_a, mut rx_a) = mpsc::channel(1);
        let (tx_b, mut rx_b) = mpsc::channel(1);
        let a = registry.register(tx_a);
        let _b = registry.register(tx_b);

        registry.sender(&a).unwrap().send(ping()).await.unwrap();

        assert!(rx_a.recv().await.is_some());
        assert!(rx_b.try_recv().is_err());
    }

    #[test]
    fn test_unknown_session_has_no_sender() {
        let registry = SessionRegistry::default();
        assert!(registry.sender(&Uuid::new_v4()).is_none());
        assert!(!registry.remove(&Uuid::new_v4()));
    }

    #[test]
    fn test_guard_removes_entry_on_drop() {
        let registry = Arc::new(SessionRegistry::default());
        let (tx, _rx) = mpsc::channel(1);
        let id = registry.register(tx);

        let guard = SessionGuard::new(id, registry.clone());
        assert_eq!(guard.id(), id);
        assert!(registry.contains(&id));

        drop(guard);
        assert!(!registry.contains(&id));
        assert!(registry.is_empty());
    }
}
