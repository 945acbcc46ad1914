//! `WS /agent/stream` (spec §6): read-only game-state broadcast. On
//! connect the cached state (if any) is sent once, then the connection is
//! simply fed every `state_update` this replica broadcasts. Any inbound
//! message is rejected with `NOT_SUPPORTED` rather than closing the socket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use protocol::wire::{RelayToAgent, NOT_SUPPORTED};

use crate::state::AppState;

pub async fn agent_stream(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    if let Some((tick_id, game_state)) = state.cached_state.read().await.clone() {
        let initial = RelayToAgent::StateUpdate {
            tick_id,
            game_id: crate::state::AGENT_GAME_ID.to_string(),
            state: Box::new(game_state),
        };
        if let Ok(text) = serde_json::to_string(&initial) {
            if sender.send(Message::Text(text)).await.is_err() {
                return;
            }
        }
    }

    let mut updates = state.agent_broadcast.subscribe();
    let rejection = serde_json::json!({ "type": "error", "code": NOT_SUPPORTED }).to_string();

    loop {
        tokio::select! {
            update = updates.recv() => {
                match update {
                    Ok(text) => {
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "agent stream lagged behind broadcast");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {
                        if sender.send(Message::Text(rejection.clone())).await.is_err() {
                            break;
                        }
                    }
                    Some(Err(_)) => break,
                }
            }
        }
    }
}
