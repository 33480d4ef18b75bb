//! Application state.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use visprompt_core::{AnalysisClient, MemoryClipboard, Session, SessionSnapshot};

/// WebSocket message types.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(tag = "type", content = "data")]
pub enum WebSocketMessage {
    StateChanged(SessionSnapshot),
}

/// Application state shared across handlers.
///
/// One session per server: the page is a single-user tool.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
    pub client: Arc<dyn AnalysisClient>,
    pub clipboard: Arc<MemoryClipboard>,
    pub tx: broadcast::Sender<WebSocketMessage>,
}

impl AppState {
    pub fn new(client: Arc<dyn AnalysisClient>) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            client,
            clipboard: Arc::new(MemoryClipboard::new()),
            tx,
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Broadcast a message to all WebSocket clients.
    pub fn broadcast(&self, msg: WebSocketMessage) {
        let _ = self.tx.send(msg);
    }

    /// Broadcast the current session state.
    pub async fn publish(&self) {
        let snapshot = self.snapshot().await;
        self.broadcast(WebSocketMessage::StateChanged(snapshot));
    }
}
