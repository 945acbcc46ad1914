//! Per-agent score/streak/history bookkeeping backing `getHistory` and the
//! `yourScore`/`yourRank`/`streak` fields the game-state service overlays
//! onto the decoded document (spec §4.12). Not persisted durably — this is
//! explicitly a stub accounting scheme (see the "OPEN QUESTION
//! RESOLUTIONS" in the project's full spec): every accepted vote bumps the
//! voting agent's score and streak by a fixed nominal amount so the field
//! isn't a bare zero, without claiming to track real game progress.

use std::collections::HashMap;
use std::sync::Mutex;

use protocol::Action;

/// Score/streak awarded per accepted vote.
const POINTS_PER_VOTE: u64 = 1;

#[derive(Debug, Clone, Default)]
struct AgentRecord {
    score: u64,
    streak: u32,
    history: Vec<(u64, Action)>,
}

/// Caps how many history entries are retained per agent, independent of
/// the game-state document's own `turnHistory` cap.
const HISTORY_CAP: usize = 100;

#[derive(Default)]
pub struct Scoreboard {
    agents: Mutex<HashMap<String, AgentRecord>>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `agent_id`'s vote for `turn` was accepted, bumping
    /// score and streak and appending to the capped history.
    pub fn record_accepted_vote(&self, agent_id: &str, turn: u64, action: Action) {
        let mut agents = self.agents.lock().unwrap();
        let record = agents.entry(agent_id.to_string()).or_default();
        record.score += POINTS_PER_VOTE;
        record.streak += 1;
        record.history.push((turn, action));
        if record.history.len() > HISTORY_CAP {
            record.history.remove(0);
        }
    }

    /// Resets `agent_id`'s streak, e.g. after a tick where it cast no vote.
    pub fn reset_streak(&self, agent_id: &str) {
        let mut agents = self.agents.lock().unwrap();
        if let Some(record) = agents.get_mut(agent_id) {
            record.streak = 0;
        }
    }

    pub fn score(&self, agent_id: &str) -> u64 {
        self.agents.lock().unwrap().get(agent_id).map(|r| r.score).unwrap_or(0)
    }

    pub fn streak(&self, agent_id: &str) -> u32 {
        self.agents.lock().unwrap().get(agent_id).map(|r| r.streak).unwrap_or(0)
    }

    /// 1-based rank of `agent_id` by score, descending, among every agent
    /// that has ever voted; unseen agents rank last.
    pub fn rank(&self, agent_id: &str) -> u32 {
        let agents = self.agents.lock().unwrap();
        let mut scores: Vec<u64> = agents.values().map(|r| r.score).collect();
        scores.sort_unstable_by(|a, b| b.cmp(a));
        let my_score = agents.get(agent_id).map(|r| r.score).unwrap_or(0);
        (scores.iter().filter(|s| **s > my_score).count() + 1) as u32
    }

    pub fn total_agents(&self) -> u32 {
        self.agents.lock().unwrap().len() as u32
    }

    pub fn history(&self, agent_id: &str, limit: usize) -> Vec<(u64, Action)> {
        let agents = self.agents.lock().unwrap();
        match agents.get(agent_id) {
            Some(record) => record.history.iter().rev().take(limit).rev().copied().collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_votes_increase_score_and_streak() {
        let board = Scoreboard::new();
        board.record_accepted_vote("a1", 1, Action::Up);
        board.record_accepted_vote("a1", 2, Action::Down);
        assert_eq!(board.score("a1"), 2);
        assert_eq!(board.streak("a1"), 2);
    }

    #[test]
    fn reset_streak_zeros_it_without_touching_score() {
        let board = Scoreboard::new();
        board.record_accepted_vote("a1", 1, Action::Up);
        board.reset_streak("a1");
        assert_eq!(board.streak("a1"), 0);
        assert_eq!(board.score("a1"), 1);
    }

    #[test]
    fn rank_orders_by_score_descending() {
        let board = Scoreboard::new();
        board.record_accepted_vote("a1", 1, Action::Up);
        for i in 0..3 {
            board.record_accepted_vote("a2", i, Action::Up);
        }
        assert_eq!(board.rank("a2"), 1);
        assert_eq!(board.rank("a1"), 2);
    }

    #[test]
    fn unseen_agent_has_zero_score_and_last_rank() {
        let board = Scoreboard::new();
        board.record_accepted_vote("a1", 1, Action::Up);
        assert_eq!(board.score("unknown"), 0);
        assert_eq!(board.rank("unknown"), 2);
    }

    #[test]
    fn history_respects_limit_and_insertion_order() {
        let board = Scoreboard::new();
        for i in 0..5 {
            board.record_accepted_vote("a1", i, Action::Up);
        }
        let history = board.history("a1", 2);
        assert_eq!(history, vec![(3, Action::Up), (4, Action::Up)]);
    }
}
