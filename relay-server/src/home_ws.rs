//! `WS /home/connect` (spec §6): trusted back-end ingress. The first
//! message must be `{secret}`; on mismatch the relay answers
//! `{type:error, code:AUTH_FAILED}` and closes with code 1008. Once
//! authenticated, the relay relays `state_push`/`votes_request` and flushes
//! buffered votes as `vote_batch`.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};

use protocol::wire::{HomeAuth, HomeToRelay, RelayToHome, VoteRecord};

use crate::state::{AppState, AGENT_GAME_ID};

const AUTH_FAILED_CLOSE_CODE: u16 = 1008;
/// The home client is expected to send an unsolicited heartbeat every 30 s
/// (spec §4.8); if nothing arrives for 3x that, the connection is presumed dead.
const IDLE_TIMEOUT: Duration = Duration::from_secs(90);

pub async fn home_connect(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let Some(Ok(Message::Text(first))) = receiver.next().await else {
        return;
    };
    let authenticated = serde_json::from_str::<HomeAuth>(&first)
        .map(|auth| auth.secret == state.config.relay_shared_secret)
        .unwrap_or(false);

    if !authenticated {
        let error = serde_json::json!({ "type": "error", "code": "AUTH_FAILED" }).to_string();
        let _ = sender.send(Message::Text(error)).await;
        let _ = sender
            .send(Message::Close(Some(CloseFrame {
                code: AUTH_FAILED_CLOSE_CODE,
                reason: "invalid home secret".into(),
            })))
            .await;
        return;
    }

    tracing::info!("home client authenticated");
    state.set_home_connected(true);
    flush_votes(&state, &mut sender, AGENT_GAME_ID, pending_tick(&state).await).await;

    loop {
        let incoming = tokio::time::timeout(IDLE_TIMEOUT, receiver.next()).await;
        let message = match incoming {
            Ok(Some(Ok(Message::Text(text)))) => text,
            Ok(Some(Ok(Message::Close(_)))) | Ok(None) => break,
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(_))) => break,
            Err(_) => {
                tracing::warn!("home client idle timeout");
                break;
            }
        };

        match serde_json::from_str::<HomeToRelay>(&message) {
            Ok(HomeToRelay::StatePush { tick_id, game_id, state: pushed }) => {
                state.publish_state(tick_id, &game_id, *pushed).await;
                flush_votes(&state, &mut sender, &game_id, tick_id).await;
            }
            Ok(HomeToRelay::VotesRequest { tick_id, game_id }) => {
                flush_votes(&state, &mut sender, &game_id, tick_id).await;
            }
            Ok(HomeToRelay::HeartbeatAck { .. }) => {}
            Ok(HomeToRelay::Unknown) => {
                tracing::debug!("ignoring unknown message type from home client");
            }
            Err(error) => {
                tracing::warn!(%error, "malformed message from home client");
            }
        }
    }

    state.set_home_connected(false);
    tracing::info!("home client disconnected");
}

async fn pending_tick(state: &AppState) -> u64 {
    state.cached_state_tick().await.unwrap_or(0)
}

/// Sends the current agent-vote hash for `(game_id, tick_id)` to the home
/// client (spec §6: "the relay immediately attempts to flush the
/// agent-vote hash ... by sending a `vote_batch`").
async fn flush_votes(
    state: &Arc<AppState>,
    sender: &mut (impl futures_util::Sink<Message, Error = axum::Error> + Unpin),
    game_id: &str,
    tick_id: u64,
) {
    let cast = match state.votes.list(game_id, tick_id).await {
        Ok(cast) => cast,
        Err(error) => {
            tracing::warn!(%error, "failed to list votes for home flush");
            return;
        }
    };
    if cast.is_empty() {
        return;
    }

    let votes = cast
        .into_iter()
        .map(|(agent_id, action, timestamp)| VoteRecord { agent_id, action, timestamp })
        .collect();

    let batch = RelayToHome::VoteBatch {
        tick_id,
        game_id: game_id.to_string(),
        votes,
    };
    if let Ok(text) = serde_json::to_string(&batch) {
        let _ = sender.send(Message::Text(text)).await;
    }
}
