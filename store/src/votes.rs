//! Thin convenience wrapper over the vote operations on [`KvStore`] (spec
//! §4.5), giving the tick processor and relay server a single type to hold.

use std::sync::Arc;

use protocol::Action;

use crate::error::StoreError;
use crate::kv::{KvStore, VoteTally};

pub struct VoteAggregator {
    kv: Arc<dyn KvStore>,
}

impl VoteAggregator {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn record_vote(
        &self,
        game_id: &str,
        tick_id: u64,
        agent_id: &str,
        action: Action,
        ts_ms: i64,
    ) -> Result<(), StoreError> {
        self.kv.record_vote(game_id, tick_id, agent_id, action, ts_ms).await
    }

    pub async fn tally(&self, game_id: &str, tick_id: u64) -> Result<VoteTally, StoreError> {
        self.kv.tally_votes(game_id, tick_id).await
    }

    /// The actual per-agent votes cast for `(game_id, tick_id)`, for callers
    /// that need identity and timestamp rather than just the aggregate tally.
    pub async fn list(&self, game_id: &str, tick_id: u64) -> Result<Vec<(String, Action, i64)>, StoreError> {
        self.kv.list_votes(game_id, tick_id).await
    }

    pub async fn clear(&self, game_id: &str, tick_id: u64) -> Result<(), StoreError> {
        self.kv.clear_votes(game_id, tick_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::fake::FakeStore;

    #[tokio::test]
    async fn majority_action_wins() {
        let aggregator = VoteAggregator::new(Arc::new(FakeStore::new()));
        aggregator.record_vote("g", 1, "a1", Action::Up, 0).await.unwrap();
        aggregator.record_vote("g", 1, "a2", Action::Up, 1).await.unwrap();
        aggregator.record_vote("g", 1, "a3", Action::Down, 2).await.unwrap();

        let tally = aggregator.tally("g", 1).await.unwrap();
        assert_eq!(tally.winning_action, Action::Up);
        assert_eq!(tally.total_votes, 3);
    }
}
