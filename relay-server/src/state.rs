//! Shared application state for the relay (spec §4.9/§4.10): everything an
//! axum handler needs, held behind one `Arc` so every replica of this
//! process reads/writes the same shared KV-backed records and keeps its
//! own process-local cache of the last pushed state (spec §9: "cached
//! state is deliberately process-local").

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use protocol::GameState;
use tokio::sync::{broadcast, RwLock};

use crate::config::Config;
use store::{BanRegistry, CredentialStore, RateLimiter, Scoreboard, VoteAggregator};

pub const AGENT_GAME_ID: &str = "game-1";
/// Broadcast channel capacity: a slow agent connection can lag this many
/// state pushes behind before `RecvError::Lagged` kicks it to resync.
const AGENT_BROADCAST_CAPACITY: usize = 64;
/// Pub/sub channel carrying serialized `state_update` messages between
/// replicas (spec §9: cross-replica consistency is pub/sub, not a shared cache).
pub const STATE_CHANNEL: &str = "relay:state-updates";

pub struct AppState {
    pub config: Config,
    pub kv: Arc<dyn store::KvStore>,
    pub credentials: CredentialStore,
    pub bans: BanRegistry,
    pub rate_limiter: RateLimiter,
    pub votes: VoteAggregator,
    /// Per-replica, in-memory agent score/streak accounting (spec §4.12's
    /// "Open Question Resolutions": not persisted durably, best-effort).
    pub scoreboard: Scoreboard,
    pub cached_state: RwLock<Option<(u64, GameState)>>,
    pub home_connected: AtomicBool,
    pub agent_broadcast: broadcast::Sender<String>,
    start_time_ms: i64,
}

impl AppState {
    pub fn new(config: Config, kv: Arc<dyn store::KvStore>) -> Self {
        let (agent_broadcast, _) = broadcast::channel(AGENT_BROADCAST_CAPACITY);
        Self {
            credentials: CredentialStore::new(kv.clone()),
            bans: BanRegistry::new(kv.clone()),
            rate_limiter: RateLimiter::new(kv.clone()),
            votes: VoteAggregator::new(kv.clone()),
            scoreboard: Scoreboard::new(),
            kv,
            config,
            cached_state: RwLock::new(None),
            home_connected: AtomicBool::new(false),
            agent_broadcast,
            start_time_ms: now_ms(),
        }
    }

    pub fn home_connected(&self) -> bool {
        self.home_connected.load(Ordering::SeqCst)
    }

    pub fn set_home_connected(&self, connected: bool) {
        self.home_connected.store(connected, Ordering::SeqCst);
    }

    pub async fn cached_state_tick(&self) -> Option<u64> {
        self.cached_state.read().await.as_ref().map(|(tick, _)| *tick)
    }

    /// Replaces the cached state, fans it out to every agent subscribed on
    /// this replica, and publishes it so every other replica does the same
    /// (spec §4.10, testable property 10: cross-replica broadcast).
    pub async fn publish_state(&self, tick_id: u64, game_id: &str, state: GameState) {
        let text = self.apply_state_locally(tick_id, game_id, state).await;
        let _ = self.kv.publish(STATE_CHANNEL, &text).await;
    }

    /// Applies a `state_update` received over [`STATE_CHANNEL`] from another
    /// replica. Never re-publishes, since the originating replica already did.
    pub async fn apply_remote_state(&self, text: &str) {
        let Ok(message) = serde_json::from_str::<protocol::wire::RelayToAgent>(text) else {
            return;
        };
        if let protocol::wire::RelayToAgent::StateUpdate { tick_id, state, .. } = message {
            *self.cached_state.write().await = Some((tick_id, *state));
        }
        let _ = self.agent_broadcast.send(text.to_string());
    }

    async fn apply_state_locally(&self, tick_id: u64, game_id: &str, state: GameState) -> String {
        *self.cached_state.write().await = Some((tick_id, state.clone()));

        let message = protocol::wire::RelayToAgent::StateUpdate {
            tick_id,
            game_id: game_id.to_string(),
            state: Box::new(state),
        };
        let text = serde_json::to_string(&message).unwrap_or_default();
        let _ = self.agent_broadcast.send(text.clone());
        text
    }

    pub fn started_at_ms(&self) -> i64 {
        self.start_time_ms
    }
}

pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
