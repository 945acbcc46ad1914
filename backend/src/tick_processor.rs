//! Tick processor (spec §4.7): on each interval, tally the pending tick's
//! votes, actuate the emulator, decode the resulting RAM, persist and
//! publish the new state, and clear the tick's votes.

use std::sync::Arc;

use protocol::state::TurnHistoryEntry;
use protocol::{Action, GameState, Phase};
use tracing::{error, warn};

use decoder::{decode, ScoreboardInputs};
use store::{Scoreboard, VoteAggregator};

use crate::emulator::Emulator;
use crate::error::TickError;

/// Default tick interval (spec §4.7: "default 15 s").
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 15_000;

/// One cooperative game's tick loop state: the bound `gameId`, the pending
/// tick number, and the last decoded state (used to re-derive
/// `availableActions` for the action filter and as the seed for
/// `turnHistory`).
pub struct TickProcessor<E: Emulator> {
    pub game_id: String,
    emulator: Arc<E>,
    votes: Arc<VoteAggregator>,
    scoreboard: Arc<Scoreboard>,
    last_state: Option<GameState>,
}

/// Result of one successful tick, handed to the caller for persistence and
/// publication (§4.7 steps 7-8 happen outside this type; this just computes
/// step 1-6).
pub struct TickOutcome {
    pub tick: u64,
    pub action: Action,
    pub state: GameState,
}

impl<E: Emulator> TickProcessor<E> {
    pub fn new(
        game_id: impl Into<String>,
        emulator: Arc<E>,
        votes: Arc<VoteAggregator>,
        scoreboard: Arc<Scoreboard>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            emulator,
            votes,
            scoreboard,
            last_state: None,
        }
    }

    /// Seeds the processor with a prior state, e.g. to exercise the action
    /// filter against a restricted `availableActions` set in tests.
    pub fn seed_state(&mut self, state: GameState) {
        self.last_state = Some(state);
    }

    /// Runs one full tick (spec §4.7 steps 1-8). Errors are the caller's
    /// cue to skip this tick and retry on the next interval (step re-attempt
    /// happens in the caller's loop, not here).
    pub async fn run_tick(&mut self) -> Result<TickOutcome, TickError> {
        let pending_tick = self.last_state.as_ref().map(|s| s.turn).unwrap_or(0);

        let tally = self
            .votes
            .tally(&self.game_id, pending_tick)
            .await
            .map_err(TickError::Store)?;

        let available = self
            .last_state
            .as_ref()
            .map(|s| s.available_actions.clone())
            .unwrap_or_else(|| Action::ALL.to_vec());

        let action = if available.contains(&tally.winning_action) {
            tally.winning_action
        } else {
            warn!(game_id = %self.game_id, tick = pending_tick, "winning action not available, falling back");
            Action::FALLBACK
        };

        self.emulator.press(action).await;
        self.emulator.advance_frames(action.extra_frames()).await;

        let ram = self.emulator.read_ram().await;

        let mut turn_history = self
            .last_state
            .as_ref()
            .map(|s| s.turn_history.clone())
            .unwrap_or_default();
        let phase_before_decode = self
            .last_state
            .as_ref()
            .map(|s| s.phase)
            .unwrap_or(Phase::Overworld);
        turn_history.push(TurnHistoryEntry {
            turn: pending_tick,
            action,
            phase: phase_before_decode,
        });
        if turn_history.len() > protocol::state::TURN_HISTORY_CAP {
            turn_history.remove(0);
        }

        let scoreboard_inputs = ScoreboardInputs {
            your_score: 0,
            your_rank: 0,
            total_agents: self.scoreboard.total_agents(),
            streak: 0,
        };

        let new_state = decode(&ram, pending_tick + 1, 15, turn_history, scoreboard_inputs);

        if let Err(violation) = new_state.validate() {
            error!(game_id = %self.game_id, %violation, "decoder produced an invalid state");
        }

        self.votes
            .clear(&self.game_id, pending_tick)
            .await
            .map_err(TickError::Store)?;

        self.last_state = Some(new_state.clone());

        Ok(TickOutcome {
            tick: pending_tick + 1,
            action,
            state: new_state,
        })
    }

    pub fn current_state(&self) -> Option<&GameState> {
        self.last_state.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::mock::MockEmulator;
    use protocol::Action;
    use store::FakeStore;

    fn sample_state() -> GameState {
        use protocol::state::{Player, Position, Progress, Direction};
        GameState {
            turn: 0,
            phase: Phase::Overworld,
            seconds_remaining: 15,
            available_actions: Action::ALL.to_vec(),
            player: Player {
                name: "Red".into(),
                position: Position { x: 0, y: 0, map_id: 0, direction: Direction::Down },
                money: 0,
                badges: vec![],
            },
            party: vec![],
            inventory: vec![],
            battle: None,
            overworld: Some(protocol::state::OverworldState {
                map_id: 0,
                encounter_rate_percent: 0.0,
                available_hms: vec![],
            }),
            screen_text: None,
            menu_state: None,
            progress: Progress::default(),
            your_score: 0,
            your_rank: 0,
            total_agents: 0,
            streak: 0,
            tip: "tip".into(),
            turn_history: vec![],
        }
    }

    async fn processor() -> TickProcessor<MockEmulator> {
        let kv = Arc::new(FakeStore::new());
        TickProcessor::new(
            "game-1",
            Arc::new(MockEmulator::new()),
            Arc::new(VoteAggregator::new(kv)),
            Arc::new(Scoreboard::new()),
        )
    }

    /// spec §8 S4: with no votes recorded, the tick processor presses the
    /// fallback button and advances 0 extra frames.
    #[tokio::test]
    async fn s4_fallback_with_no_votes() {
        let mut processor = processor().await;
        let outcome = processor.run_tick().await.unwrap();
        assert_eq!(outcome.action, Action::FALLBACK);
        assert_eq!(outcome.tick, 1);
    }

    /// spec §8 item 5: turn increases by exactly one and history grows by
    /// exactly one entry per tick.
    #[tokio::test]
    async fn turn_increments_and_history_grows_by_one() {
        let mut processor = processor().await;
        let first = processor.run_tick().await.unwrap();
        assert_eq!(first.state.turn, 1);
        assert_eq!(first.state.turn_history.len(), 1);

        let second = processor.run_tick().await.unwrap();
        assert_eq!(second.state.turn, 2);
        assert_eq!(second.state.turn_history.len(), 2);
    }

    /// spec §8 item 4: the applied action always belongs to
    /// `previousState.availableActions`; an illegal winner falls back to `a`.
    #[tokio::test]
    async fn winning_action_outside_available_set_falls_back() {
        let kv = Arc::new(FakeStore::new());
        let votes = Arc::new(VoteAggregator::new(kv));
        votes.record_vote("game-1", 0, "agent-1", Action::Up, 0).await.unwrap();

        let mut processor = TickProcessor::new(
            "game-1",
            Arc::new(MockEmulator::new()),
            votes,
            Arc::new(Scoreboard::new()),
        );
        let mut restricted = sample_state();
        restricted.available_actions = vec![Action::A, Action::B];
        processor.seed_state(restricted);

        let outcome = processor.run_tick().await.unwrap();
        assert_eq!(outcome.action, Action::FALLBACK);
    }

    /// spec §8 item 1/2: many agents voting tallies to the majority action.
    #[tokio::test]
    async fn majority_vote_wins_the_tick() {
        let kv = Arc::new(FakeStore::new());
        let votes = Arc::new(VoteAggregator::new(kv));
        votes.record_vote("game-1", 0, "a1", Action::Down, 0).await.unwrap();
        votes.record_vote("game-1", 0, "a2", Action::Down, 1).await.unwrap();
        votes.record_vote("game-1", 0, "a3", Action::Up, 2).await.unwrap();

        let mut processor = TickProcessor::new(
            "game-1",
            Arc::new(MockEmulator::new()),
            votes,
            Arc::new(Scoreboard::new()),
        );
        let outcome = processor.run_tick().await.unwrap();
        assert_eq!(outcome.action, Action::Down);
    }
}
