//! WebSocket handler for live state updates.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tracing::{debug, info, warn};

use crate::state::{AppState, WebSocketMessage};

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.tx.subscribe();

    info!(receiver_count = state.tx.receiver_count(), "WebSocket client connected");

    // Current state first so a reconnecting page catches up.
    let initial = WebSocketMessage::StateChanged(state.snapshot().await);

    let send_task = tokio::spawn(async move {
        if !send_json(&mut sender, &initial).await {
            return;
        }
        while let Ok(msg) = rx.recv().await {
            if !send_json(&mut sender, &msg).await {
                debug!("WebSocket send failed, client disconnected");
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                debug!("WebSocket client sent close frame");
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    info!("WebSocket client disconnected");
}

/// Send one message as JSON. Returns false once the client is gone.
async fn send_json<S>(sender: &mut S, msg: &WebSocketMessage) -> bool
where
    S: SinkExt<Message> + Unpin,
{
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            warn!(error = %e, "Failed to serialize WebSocket message");
            return true;
        }
    };
    sender.send(Message::Text(json.into())).await.is_ok()
}
