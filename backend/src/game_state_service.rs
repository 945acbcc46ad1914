//! Bridges the tick pipeline to the outside world (spec §4.8/§4.10): the
//! [`TickSink`] [`PhaseSupervisor`](crate::phase_supervisor::PhaseSupervisor)
//! calls after every tick, which forwards the freshly decoded [`GameState`]
//! to the relay over [`HomeClient`]. Per-agent personalization of the
//! document (`yourScore`/`yourRank`/`streak`) happens downstream, in the
//! relay process that actually serves agents — this type only owns the
//! shared tick loop's lifecycle and the outbound push.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::emulator::Emulator;
use crate::home_client::HomeClient;
use crate::phase_supervisor::TickSink;
use crate::tick_processor::{TickOutcome, TickProcessor};

pub struct GameStateService<E: Emulator> {
    game_id: String,
    processor: Arc<Mutex<TickProcessor<E>>>,
    home_client: Option<Arc<HomeClient>>,
}

impl<E: Emulator> GameStateService<E> {
    pub fn new(game_id: impl Into<String>, processor: Arc<Mutex<TickProcessor<E>>>) -> Self {
        Self {
            game_id: game_id.into(),
            processor,
            home_client: None,
        }
    }

    /// Wires this service to push every tick's decoded state out over
    /// `home_client` (spec §4.8/§4.10). Without this, `on_tick` is a no-op.
    pub fn with_home_client(mut self, home_client: Arc<HomeClient>) -> Self {
        self.home_client = Some(home_client);
        self
    }

    /// Hands out the same processor handle this service reads from, so a
    /// watchdog built around it ticks the state this service is serving.
    pub fn processor(&self) -> Arc<Mutex<TickProcessor<E>>> {
        self.processor.clone()
    }
}

#[async_trait::async_trait]
impl<E: Emulator> TickSink for GameStateService<E> {
    async fn on_tick(&self, outcome: TickOutcome) {
        if let Some(home_client) = &self.home_client {
            home_client.push_state(outcome.tick, self.game_id.clone(), outcome.state).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::mock::MockEmulator;
    use store::{FakeStore, Scoreboard, VoteAggregator};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn on_tick_pushes_state_to_a_connected_home_client() {
        let kv = Arc::new(FakeStore::new());
        let votes = Arc::new(VoteAggregator::new(kv));
        let processor = Arc::new(Mutex::new(TickProcessor::new(
            "game-1",
            Arc::new(MockEmulator::new()),
            votes,
            Arc::new(Scoreboard::new()),
        )));
        let (tx, _rx) = mpsc::unbounded_channel();
        let home_client = Arc::new(HomeClient::new("ws://example.invalid", "0123456789abcdef", tx));

        let service = GameStateService::new("game-1", processor.clone())
            .with_home_client(home_client.clone());

        let outcome = processor.lock().await.run_tick().await.unwrap();
        // Not connected, so this is a no-op rather than a panic or a send
        // into a dead socket.
        service.on_tick(outcome).await;
        assert_eq!(home_client.state(), crate::home_client::ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn on_tick_without_a_home_client_is_a_no_op() {
        let kv = Arc::new(FakeStore::new());
        let votes = Arc::new(VoteAggregator::new(kv));
        let processor = Arc::new(Mutex::new(TickProcessor::new(
            "game-1",
            Arc::new(MockEmulator::new()),
            votes,
            Arc::new(Scoreboard::new()),
        )));
        let service = GameStateService::new("game-1", processor.clone());
        let outcome = processor.lock().await.run_tick().await.unwrap();
        service.on_tick(outcome).await;
    }
}
