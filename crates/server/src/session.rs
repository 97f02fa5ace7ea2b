// SSE session registry: session id -> outbound response channel

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use sumble_mcp::protocol::JsonRpcResponse;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

struct Session {
    sender: mpsc::Sender<JsonRpcResponse>,
    created_at: DateTime<Utc>,
}

/// Live event-stream sessions. A session exists exactly as long as its
/// [`SessionGuard`] does.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
    capacity: usize,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new session. Dropping the returned guard unregisters it.
    pub fn open(self: &Arc<Self>) -> (SessionGuard, mpsc::Receiver<JsonRpcResponse>) {
        let (sender, receiver) = mpsc::channel(self.capacity);
        let id = Uuid::new_v4().to_string();

        self.lock().insert(
            id.clone(),
            Session {
                sender,
                created_at: Utc::now(),
            },
        );

        let guard = SessionGuard {
            id,
            registry: Arc::clone(self),
        };
        (guard, receiver)
    }

    /// Outbound channel for a live session.
    pub fn sender(&self, id: &str) -> Option<mpsc::Sender<JsonRpcResponse>> {
        self.lock().get(id).map(|session| session.sender.clone())
    }

    fn take(&self, id: &str) -> Option<Session> {
        self.lock().remove(id)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }
}

/// Owns one registry entry.
pub struct SessionGuard {
    id: String,
    registry: Arc<SessionRegistry>,
}

impl SessionGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if let Some(session) = self.registry.take(&self.id) {
            let open_for = Utc::now() - session.created_at;
            info!(
                session_id = %self.id,
                open_secs = open_for.num_seconds(),
                "SSE session closed"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_open_and_deliver() {
        let registry = Arc::new(SessionRegistry::new(8));
        let (guard, mut rx) = registry.open();

        assert_eq!(registry.len(), 1);

        let sender = registry.sender(guard.id()).unwrap();
        sender
            .send(JsonRpcResponse::success(1, json!({})))
            .await
            .unwrap();

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.id, json!(1));
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = Arc::new(SessionRegistry::new(8));
        let (a, _rx_a) = registry.open();
        let (b, _rx_b) = registry.open();

        assert_ne!(a.id(), b.id());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_guard_drop_unregisters() {
        let registry = Arc::new(SessionRegistry::new(8));
        let (guard, _rx) = registry.open();
        let id = guard.id().to_string();

        drop(guard);

        assert_eq!(registry.len(), 0);
        assert!(registry.sender(&id).is_none());
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_fails() {
        let registry = Arc::new(SessionRegistry::new(8));
        let (guard, rx) = registry.open();
        let sender = registry.sender(guard.id()).unwrap();

        drop(rx);

        assert!(sender
            .send(JsonRpcResponse::success(1, json!({})))
            .await
            .is_err());
    }
}
