//! Outbound WebSocket client to the relay's `/home/connect` (spec §4.8): the
//! only way the trusted back end talks to the public relay. Connection
//! state is a small explicit machine (`Disconnected` -> `Connecting` ->
//! `Authenticating` -> `Connected` -> back to `Disconnected`) so a caller
//! can watch `state()` without digging through the task's internals.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use protocol::wire::{HomeAuth, HomeToRelay, RelayToHome};
use protocol::GameState;
use rand::Rng;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// Base and cap for the exponential reconnect backoff (spec §4.8: "100 ms,
/// doubling per attempt, capped at 30 s, plus up to 500 ms jitter").
const RECONNECT_BASE_MS: u64 = 100;
const RECONNECT_CAP_MS: u64 = 30_000;
const RECONNECT_JITTER_MS: u64 = 500;
const UNSOLICITED_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Authenticating = 2,
    Connected = 3,
}

impl From<u8> for ConnectionState {
    fn from(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Authenticating,
            3 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// A batch of votes handed off to whatever applies them to the pending tick.
/// Kept decoupled from [`store::VoteAggregator`] so this module only needs
/// to know about the wire shape.
pub type VoteBatchSink = mpsc::UnboundedSender<protocol::wire::RelayToHome>;

/// Outbound client: dials `url`, authenticates with `secret`, then proxies
/// `vote_batch` messages to `vote_sink` and answers heartbeats until the
/// socket drops, at which point it reconnects with backoff.
pub struct HomeClient {
    url: String,
    secret: String,
    state: Arc<AtomicU8>,
    outbound: Arc<tokio::sync::Mutex<Option<mpsc::UnboundedSender<Message>>>>,
    vote_sink: VoteBatchSink,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl HomeClient {
    pub fn new(url: impl Into<String>, secret: impl Into<String>, vote_sink: VoteBatchSink) -> Self {
        Self {
            url: url.into(),
            secret: secret.into(),
            state: Arc::new(AtomicU8::new(ConnectionState::Disconnected as u8)),
            outbound: Arc::new(tokio::sync::Mutex::new(None)),
            vote_sink,
            handle: None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from(self.state.load(Ordering::SeqCst))
    }

    /// Spawns the connect-authenticate-relay-reconnect loop. Idempotent.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let url = self.url.clone();
        let secret = self.secret.clone();
        let state = self.state.clone();
        let outbound = self.outbound.clone();
        let vote_sink = self.vote_sink.clone();

        self.handle = Some(tokio::spawn(async move {
            let mut attempt: u32 = 0;
            loop {
                state.store(ConnectionState::Connecting as u8, Ordering::SeqCst);
                match run_once(&url, &secret, &state, &outbound, &vote_sink).await {
                    Ok(()) => attempt = 0,
                    Err(error) => warn!(%error, attempt, "home client session ended"),
                }
                state.store(ConnectionState::Disconnected as u8, Ordering::SeqCst);
                *outbound.lock().await = None;

                let backoff = reconnect_delay(attempt);
                debug!(?backoff, "reconnecting to relay");
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }));
    }

    /// Cancels the connect loop and drops any live socket.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Pushes the authoritative state for `game_id`/`tick_id` to the relay.
    /// Silently dropped when not connected (spec §4.8), since the next tick
    /// will push a fresher state anyway.
    pub async fn push_state(&self, tick_id: u64, game_id: impl Into<String>, state: GameState) {
        if self.state() != ConnectionState::Connected {
            return;
        }
        let msg = HomeToRelay::StatePush {
            tick_id,
            game_id: game_id.into(),
            state: Box::new(state),
        };
        self.send(&msg).await;
    }

    async fn send(&self, msg: &HomeToRelay) {
        let Ok(text) = serde_json::to_string(msg) else {
            error!("failed to serialize outbound home message");
            return;
        };
        if let Some(tx) = outbound_sender(&self.outbound).await {
            let _ = tx.send(Message::Text(text));
        }
    }
}

async fn outbound_sender(
    outbound: &Arc<tokio::sync::Mutex<Option<mpsc::UnboundedSender<Message>>>>,
) -> Option<mpsc::UnboundedSender<Message>> {
    outbound.lock().await.clone()
}

fn reconnect_delay(attempt: u32) -> Duration {
    let exp = RECONNECT_BASE_MS.saturating_mul(1u64.checked_shl(attempt).unwrap_or(u64::MAX));
    let base = exp.min(RECONNECT_CAP_MS);
    let jitter = rand::thread_rng().gen_range(0..=RECONNECT_JITTER_MS);
    Duration::from_millis(base + jitter)
}

async fn run_once(
    url: &str,
    secret: &str,
    state: &Arc<AtomicU8>,
    outbound: &Arc<tokio::sync::Mutex<Option<mpsc::UnboundedSender<Message>>>>,
    vote_sink: &VoteBatchSink,
) -> Result<(), tokio_tungstenite::tungstenite::Error> {
    let (stream, _) = tokio_tungstenite::connect_async(url).await?;
    let (mut sink, mut stream) = stream.split();

    state.store(ConnectionState::Authenticating as u8, Ordering::SeqCst);
    let auth = HomeAuth { secret: secret.to_string() };
    let auth_text = serde_json::to_string(&auth).unwrap_or_default();
    sink.send(Message::Text(auth_text)).await?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    *outbound.lock().await = Some(tx);
    state.store(ConnectionState::Connected as u8, Ordering::SeqCst);
    info!(%url, "connected to relay");

    let mut heartbeat = tokio::time::interval(UNSOLICITED_HEARTBEAT_INTERVAL);
    heartbeat.tick().await; // first tick fires immediately; skip it

    loop {
        tokio::select! {
            outgoing = rx.recv() => {
                match outgoing {
                    Some(msg) => sink.send(msg).await?,
                    None => break,
                }
            }
            _ = heartbeat.tick() => {
                let ack = HomeToRelay::HeartbeatAck { timestamp: now_millis() };
                let text = serde_json::to_string(&ack).unwrap_or_default();
                sink.send(Message::Text(text)).await?;
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        match handle_inbound(&text, vote_sink).await {
                            Inbound::Continue => {}
                            Inbound::AckHeartbeat(timestamp) => {
                                let ack = HomeToRelay::HeartbeatAck { timestamp };
                                let text = serde_json::to_string(&ack).unwrap_or_default();
                                sink.send(Message::Text(text)).await?;
                            }
                            Inbound::FatalAuthError => return Ok(()),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(error)) => return Err(error),
                }
            }
        }
    }
    Ok(())
}

enum Inbound {
    Continue,
    AckHeartbeat(i64),
    FatalAuthError,
}

/// Routes `vote_batch` off to the tick pipeline and tells the caller whether
/// a heartbeat needs an immediate ack, or whether the relay signalled an
/// unrecoverable auth failure (spec §4.8: log it and let the relay close the
/// socket rather than reconnecting in a hot loop).
async fn handle_inbound(text: &str, vote_sink: &VoteBatchSink) -> Inbound {
    let Ok(msg) = serde_json::from_str::<RelayToHome>(text) else {
        warn!("dropping malformed message from relay");
        return Inbound::Continue;
    };
    match msg {
        RelayToHome::VoteBatch { .. } => {
            let _ = vote_sink.send(msg);
        }
        RelayToHome::Heartbeat { timestamp } => {
            return Inbound::AckHeartbeat(timestamp);
        }
        RelayToHome::StateUpdate { .. } => {
            debug!("ignoring echoed state_update");
        }
        RelayToHome::Error { ref code, ref message } => {
            error!(%code, %message, "relay reported an error");
            if code == "AUTH_FAILED" || code == "AUTH_REQUIRED" {
                return Inbound::FatalAuthError;
            }
        }
        RelayToHome::Unknown => {
            debug!("ignoring unknown message type from relay");
        }
    }
    Inbound::Continue
}

fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconnect_delay_doubles_and_caps() {
        let d0 = reconnect_delay(0).as_millis();
        let d1 = reconnect_delay(1).as_millis();
        assert!(d0 >= RECONNECT_BASE_MS as u128 && d0 <= (RECONNECT_BASE_MS + RECONNECT_JITTER_MS) as u128);
        assert!(d1 >= RECONNECT_BASE_MS as u128 * 2);

        let d_large = reconnect_delay(20).as_millis();
        assert!(d_large <= (RECONNECT_CAP_MS + RECONNECT_JITTER_MS) as u128);
    }

    #[test]
    fn connection_state_round_trips_through_u8() {
        assert_eq!(ConnectionState::from(ConnectionState::Connected as u8), ConnectionState::Connected);
        assert_eq!(ConnectionState::from(255), ConnectionState::Disconnected);
    }
}
