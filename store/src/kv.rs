//! The KV/pub-sub adapter (spec §4.1) and its two implementations: a real
//! `redis`-backed one for the running relay, and an in-process fake used by
//! every other module's unit tests so they don't need a live Redis.

use std::collections::HashMap;
use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;
use protocol::Action;

use crate::error::StoreError;

/// A live subscription's message stream, yielded by [`KvStore::subscribe`].
pub type MessageStream = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Outcome of a single token-bucket check (spec §4.3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: f64,
    pub retry_after_ms: u64,
}

/// Outcome of tallying one tick's votes (spec §4.5).
#[derive(Debug, Clone, PartialEq)]
pub struct VoteTally {
    pub winning_action: Action,
    pub vote_counts: HashMap<Action, u64>,
    pub total_votes: u64,
}

/// Everything every other component in this crate needs from the shared
/// store: plain hash/sorted-set/pub-sub primitives (C1), plus the two
/// operations (C3 rate limiting, C5 vote aggregation) whose correctness
/// depends on being executed atomically against concurrent replicas.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError>;

    /// Sets `field` to `value` only if it doesn't already exist, returning
    /// whether the set took effect. The atomic reserve-or-fail primitive
    /// behind `agentId` registration (spec §4.2): two concurrent callers
    /// racing to reserve the same field see exactly one `true`.
    async fn hset_nx(&self, key: &str, field: &str, value: &str) -> Result<bool, StoreError>;

    async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, StoreError>;
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, StoreError>;
    async fn hdel(&self, key: &str, field: &str) -> Result<(), StoreError>;
    async fn hlen(&self, key: &str) -> Result<u64, StoreError>;
    async fn expire(&self, key: &str, seconds: i64) -> Result<(), StoreError>;
    async fn del(&self, keys: &[&str]) -> Result<(), StoreError>;
    async fn publish(&self, channel: &str, message: &str) -> Result<(), StoreError>;

    /// Opens a standing subscription to `channel` (spec §9: cross-replica
    /// consistency is carried by pub/sub, not a shared cache). The returned
    /// stream ends when the subscription is dropped or the connection fails.
    async fn subscribe(&self, channel: &str) -> Result<MessageStream, StoreError>;

    /// Token-bucket check for `agent_id` (spec §4.3). `rps`/`burst` come
    /// from the agent's plan; `now_ms` is supplied by the caller so the
    /// operation stays deterministic under test.
    async fn take_rate_limit_token(
        &self,
        agent_id: &str,
        rps: f64,
        burst: f64,
        now_ms: i64,
    ) -> Result<RateLimitResult, StoreError>;

    /// Records one agent's vote for `(game_id, tick_id)`, superseding any
    /// earlier vote from the same agent for that tick (spec §4.5).
    async fn record_vote(
        &self,
        game_id: &str,
        tick_id: u64,
        agent_id: &str,
        action: Action,
        ts_ms: i64,
    ) -> Result<(), StoreError>;

    async fn tally_votes(&self, game_id: &str, tick_id: u64) -> Result<VoteTally, StoreError>;

    /// Returns every recorded `(agentId, action, timestamp)` for
    /// `(game_id, tick_id)`, one entry per agent (spec §6 `vote_batch`'s
    /// `votes` array needs the actual casts, not just the aggregate tally).
    async fn list_votes(&self, game_id: &str, tick_id: u64) -> Result<Vec<(String, Action, i64)>, StoreError>;

    async fn clear_votes(&self, game_id: &str, tick_id: u64) -> Result<(), StoreError>;
}

pub mod redis_store {
    use super::*;
    use redis::aio::ConnectionManager;
    use redis::AsyncCommands;

    /// Lua body for [`KvStore::take_rate_limit_token`]. Keeps the
    /// read-refill-subtract sequence atomic across replicas sharing one
    /// Redis instance, per spec §4.3.
    const TAKE_TOKEN_SCRIPT: &str = r#"
local key = KEYS[1]
local rps = tonumber(ARGV[1])
local burst = tonumber(ARGV[2])
local now_ms = tonumber(ARGV[3])

local stored = tonumber(redis.call('HGET', key, 'tokens') or burst)
local last_ms = tonumber(redis.call('HGET', key, 'last_ms') or now_ms)
local elapsed_sec = math.max(0, now_ms - last_ms) / 1000.0
local refill = math.min(burst, stored + elapsed_sec * rps)

local allowed
local retry_after_ms = 0
if refill >= 1.0 then
    refill = refill - 1.0
    allowed = 1
else
    retry_after_ms = math.ceil(((1.0 - refill) / rps) * 1000.0)
    allowed = 0
end

redis.call('HSET', key, 'tokens', tostring(refill), 'last_ms', tostring(now_ms))
redis.call('EXPIRE', key, math.ceil((burst / rps) * 2) + 1)

return {allowed, tostring(refill), retry_after_ms}
"#;

    /// Lua body for [`KvStore::record_vote`]: supersede the agent's prior
    /// vote in the tally before adding the new one, per spec §4.5 step 1-2.
    const RECORD_VOTE_SCRIPT: &str = r#"
local votes_key = KEYS[1]
local tally_key = KEYS[2]
local first_key = KEYS[3]
local agent_id = ARGV[1]
local action = ARGV[2]
local ts_ms = ARGV[3]

local old = redis.call('HGET', votes_key, agent_id)
if old then
    local old_action = string.match(old, '^([^|]+)|')
    if old_action then
        redis.call('ZINCRBY', tally_key, -1, old_action)
    end
end

redis.call('HSET', votes_key, agent_id, action .. '|' .. ts_ms)
redis.call('ZINCRBY', tally_key, 1, action)

local current_first = redis.call('HGET', first_key, action)
if not current_first or tonumber(ts_ms) < tonumber(current_first) then
    redis.call('HSET', first_key, action, ts_ms)
end

redis.call('EXPIRE', votes_key, 3600)
redis.call('EXPIRE', tally_key, 3600)
redis.call('EXPIRE', first_key, 3600)
return 1
"#;

    /// `redis`-backed implementation of [`KvStore`] (spec §4.1). Built on a
    /// `ConnectionManager`, which reconnects transparently with its own
    /// capped exponential backoff — callers here just see a `StoreError`
    /// if an operation can't complete before that happens.
    pub struct RedisStore {
        conn: ConnectionManager,
        client: redis::Client,
    }

    impl RedisStore {
        pub async fn connect(url: &str) -> Result<Self, StoreError> {
            let client = redis::Client::open(url).map_err(StoreError::from)?;
            let conn = client.get_connection_manager().await.map_err(StoreError::from)?;
            Ok(Self { conn, client })
        }

        fn votes_key(game_id: &str, tick_id: u64) -> String {
            format!("votes:{game_id}:{tick_id}")
        }
        fn tally_key(game_id: &str, tick_id: u64) -> String {
            format!("tally:{game_id}:{tick_id}")
        }
        fn tally_first_key(game_id: &str, tick_id: u64) -> String {
            format!("tallyFirst:{game_id}:{tick_id}")
        }
    }

    #[async_trait]
    impl KvStore for RedisStore {
        async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
            let mut conn = self.conn.clone();
            conn.hset::<_, _, _, ()>(key, field, value).await?;
            Ok(())
        }

        async fn hset_nx(&self, key: &str, field: &str, value: &str) -> Result<bool, StoreError> {
            let mut conn = self.conn.clone();
            Ok(conn.hset_nx(key, field, value).await?)
        }

        async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
            let mut conn = self.conn.clone();
            Ok(conn.hget(key, field).await?)
        }

        async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
            let mut conn = self.conn.clone();
            Ok(conn.hgetall(key).await?)
        }

        async fn hdel(&self, key: &str, field: &str) -> Result<(), StoreError> {
            let mut conn = self.conn.clone();
            conn.hdel::<_, _, ()>(key, field).await?;
            Ok(())
        }

        async fn hlen(&self, key: &str) -> Result<u64, StoreError> {
            let mut conn = self.conn.clone();
            Ok(conn.hlen(key).await?)
        }

        async fn expire(&self, key: &str, seconds: i64) -> Result<(), StoreError> {
            let mut conn = self.conn.clone();
            conn.expire::<_, ()>(key, seconds).await?;
            Ok(())
        }

        async fn del(&self, keys: &[&str]) -> Result<(), StoreError> {
            let mut conn = self.conn.clone();
            conn.del::<_, ()>(keys).await?;
            Ok(())
        }

        async fn publish(&self, channel: &str, message: &str) -> Result<(), StoreError> {
            let mut conn = self.conn.clone();
            conn.publish::<_, _, ()>(channel, message).await?;
            Ok(())
        }

        async fn subscribe(&self, channel: &str) -> Result<MessageStream, StoreError> {
            use futures_util::StreamExt;
            let mut pubsub = self.client.get_async_pubsub().await.map_err(StoreError::from)?;
            pubsub.subscribe(channel).await.map_err(StoreError::from)?;
            let stream = pubsub
                .into_on_message()
                .filter_map(|msg| async move { msg.get_payload::<String>().ok() });
            Ok(Box::pin(stream))
        }

        async fn take_rate_limit_token(
            &self,
            agent_id: &str,
            rps: f64,
            burst: f64,
            now_ms: i64,
        ) -> Result<RateLimitResult, StoreError> {
            let mut conn = self.conn.clone();
            let key = format!("ratelimit:{agent_id}");
            let (allowed, remaining, retry_after_ms): (i64, String, u64) =
                redis::Script::new(TAKE_TOKEN_SCRIPT)
                    .key(key)
                    .arg(rps)
                    .arg(burst)
                    .arg(now_ms)
                    .invoke_async(&mut conn)
                    .await?;
            Ok(RateLimitResult {
                allowed: allowed == 1,
                remaining: remaining.parse().unwrap_or(0.0),
                retry_after_ms,
            })
        }

        async fn record_vote(
            &self,
            game_id: &str,
            tick_id: u64,
            agent_id: &str,
            action: Action,
            ts_ms: i64,
        ) -> Result<(), StoreError> {
            let mut conn = self.conn.clone();
            let _: i64 = redis::Script::new(RECORD_VOTE_SCRIPT)
                .key(Self::votes_key(game_id, tick_id))
                .key(Self::tally_key(game_id, tick_id))
                .key(Self::tally_first_key(game_id, tick_id))
                .arg(agent_id)
                .arg(action.as_str())
                .arg(ts_ms)
                .invoke_async(&mut conn)
                .await?;
            Ok(())
        }

        async fn tally_votes(&self, game_id: &str, tick_id: u64) -> Result<VoteTally, StoreError> {
            let mut conn = self.conn.clone();
            let tally_key = Self::tally_key(game_id, tick_id);
            let first_key = Self::tally_first_key(game_id, tick_id);
            let raw: Vec<(String, f64)> = conn.zrange_withscores(&tally_key, 0, -1).await?;
            let firsts: HashMap<String, String> = conn.hgetall(&first_key).await?;
            Ok(tally_from_raw(raw, firsts))
        }

        async fn list_votes(&self, game_id: &str, tick_id: u64) -> Result<Vec<(String, Action, i64)>, StoreError> {
            let mut conn = self.conn.clone();
            let raw: HashMap<String, String> = conn.hgetall(Self::votes_key(game_id, tick_id)).await?;
            Ok(votes_from_raw(raw))
        }

        async fn clear_votes(&self, game_id: &str, tick_id: u64) -> Result<(), StoreError> {
            let mut conn = self.conn.clone();
            conn.del::<_, ()>(&[
                Self::votes_key(game_id, tick_id),
                Self::tally_key(game_id, tick_id),
                Self::tally_first_key(game_id, tick_id),
            ])
            .await?;
            Ok(())
        }
    }

    /// Turns raw `(action, count)` pairs plus earliest-timestamp bookkeeping
    /// into the winner, breaking ties by earliest timestamp ascending and
    /// falling back to [`Action::FALLBACK`] when nothing was cast (spec §4.5).
    pub(crate) fn tally_from_raw(
        raw: Vec<(String, f64)>,
        firsts: HashMap<String, String>,
    ) -> VoteTally {
        let mut vote_counts = HashMap::new();
        let mut total_votes = 0u64;
        for (action_str, count) in &raw {
            if let Some(action) = parse_action(action_str) {
                let count = (*count).max(0.0) as u64;
                vote_counts.insert(action, count);
                total_votes += count;
            }
        }

        let winning_action = raw
            .iter()
            .filter(|(_, count)| *count > 0.0)
            .filter_map(|(action_str, count)| {
                parse_action(action_str).map(|action| (action, *count, first_ts(&firsts, action_str)))
            })
            .max_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap()
                    .then_with(|| b.2.cmp(&a.2))
            })
            .map(|(action, _, _)| action)
            .unwrap_or(Action::FALLBACK);

        VoteTally {
            winning_action,
            vote_counts,
            total_votes,
        }
    }

    /// Parses the `votes_key` hash (`agentId -> "action|ts_ms"`) back into
    /// per-agent vote records.
    pub(crate) fn votes_from_raw(raw: HashMap<String, String>) -> Vec<(String, Action, i64)> {
        raw.into_iter()
            .filter_map(|(agent_id, value)| {
                let (action_str, ts_str) = value.split_once('|')?;
                let action = parse_action(action_str)?;
                let ts_ms = ts_str.parse().ok()?;
                Some((agent_id, action, ts_ms))
            })
            .collect()
    }

    fn first_ts(firsts: &HashMap<String, String>, action_str: &str) -> i64 {
        firsts
            .get(action_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or(i64::MAX)
    }

    fn parse_action(s: &str) -> Option<Action> {
        Action::ALL.iter().copied().find(|a| a.as_str() == s)
    }
}

pub mod fake {
    use super::*;
    use std::sync::Mutex;
    use tokio::sync::broadcast;

    const CHANNEL_CAPACITY: usize = 64;

    /// In-process stand-in for [`KvStore`], used by every other component's
    /// unit tests. Correctness (including "atomicity") comes from holding
    /// one process-wide mutex across each logical operation — sufficient
    /// for single-process tests, unlike the real multi-replica case.
    #[derive(Default)]
    pub struct FakeStore {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        hashes: HashMap<String, HashMap<String, String>>,
        buckets: HashMap<String, (f64, i64)>,
        votes: HashMap<(String, u64), HashMap<String, (Action, i64)>>,
        published: Vec<(String, String)>,
        channels: HashMap<String, broadcast::Sender<String>>,
    }

    impl Inner {
        fn channel(&mut self, channel: &str) -> broadcast::Sender<String> {
            self.channels
                .entry(channel.to_string())
                .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
                .clone()
        }
    }

    impl FakeStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Messages handed to [`KvStore::publish`] so far, for test assertions.
        pub fn published_messages(&self) -> Vec<(String, String)> {
            self.inner.lock().unwrap().published.clone()
        }
    }

    #[async_trait]
    impl KvStore for FakeStore {
        async fn hset(&self, key: &str, field: &str, value: &str) -> Result<(), StoreError> {
            let mut inner = self.inner.lock().unwrap();
            inner
                .hashes
                .entry(key.to_string())
                .or_default()
                .insert(field.to_string(), value.to_string());
            Ok(())
        }

        async fn hset_nx(&self, key: &str, field: &str, value: &str) -> Result<bool, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            let hash = inner.hashes.entry(key.to_string()).or_default();
            if hash.contains_key(field) {
                return Ok(false);
            }
            hash.insert(field.to_string(), value.to_string());
            Ok(true)
        }

        async fn hget(&self, key: &str, field: &str) -> Result<Option<String>, StoreError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.hashes.get(key).and_then(|h| h.get(field).cloned()))
        }

        async fn hgetall(&self, key: &str) -> Result<HashMap<String, String>, StoreError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.hashes.get(key).cloned().unwrap_or_default())
        }

        async fn hdel(&self, key: &str, field: &str) -> Result<(), StoreError> {
            let mut inner = self.inner.lock().unwrap();
            if let Some(h) = inner.hashes.get_mut(key) {
                h.remove(field);
            }
            Ok(())
        }

        async fn hlen(&self, key: &str) -> Result<u64, StoreError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.hashes.get(key).map(|h| h.len() as u64).unwrap_or(0))
        }

        async fn expire(&self, _key: &str, _seconds: i64) -> Result<(), StoreError> {
            // TTL bookkeeping is irrelevant to single-process test runs.
            Ok(())
        }

        async fn del(&self, keys: &[&str]) -> Result<(), StoreError> {
            let mut inner = self.inner.lock().unwrap();
            for key in keys {
                inner.hashes.remove(*key);
                inner.buckets.remove(*key);
            }
            Ok(())
        }

        async fn publish(&self, channel: &str, message: &str) -> Result<(), StoreError> {
            let mut inner = self.inner.lock().unwrap();
            inner.published.push((channel.to_string(), message.to_string()));
            let sender = inner.channel(channel);
            let _ = sender.send(message.to_string());
            Ok(())
        }

        async fn subscribe(&self, channel: &str) -> Result<MessageStream, StoreError> {
            use futures_util::StreamExt;
            let receiver = self.inner.lock().unwrap().channel(channel).subscribe();
            let stream = futures_util::stream::unfold(receiver, |mut receiver| async move {
                loop {
                    match receiver.recv().await {
                        Ok(message) => return Some((message, receiver)),
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            });
            Ok(stream.boxed())
        }

        async fn take_rate_limit_token(
            &self,
            agent_id: &str,
            rps: f64,
            burst: f64,
            now_ms: i64,
        ) -> Result<RateLimitResult, StoreError> {
            let mut inner = self.inner.lock().unwrap();
            let (stored, last_ms) = *inner
                .buckets
                .entry(agent_id.to_string())
                .or_insert((burst, now_ms));
            let elapsed_sec = (now_ms - last_ms).max(0) as f64 / 1000.0;
            let mut refill = (stored + elapsed_sec * rps).min(burst);

            let (allowed, retry_after_ms) = if refill >= 1.0 {
                refill -= 1.0;
                (true, 0)
            } else {
                let retry = ((1.0 - refill) / rps * 1000.0).ceil().max(0.0) as u64;
                (false, retry)
            };

            inner.buckets.insert(agent_id.to_string(), (refill, now_ms));
            Ok(RateLimitResult {
                allowed,
                remaining: refill,
                retry_after_ms,
            })
        }

        async fn record_vote(
            &self,
            game_id: &str,
            tick_id: u64,
            agent_id: &str,
            action: Action,
            ts_ms: i64,
        ) -> Result<(), StoreError> {
            let mut inner = self.inner.lock().unwrap();
            let tick_votes = inner
                .votes
                .entry((game_id.to_string(), tick_id))
                .or_default();
            tick_votes.insert(agent_id.to_string(), (action, ts_ms));
            Ok(())
        }

        async fn tally_votes(&self, game_id: &str, tick_id: u64) -> Result<VoteTally, StoreError> {
            let inner = self.inner.lock().unwrap();
            let Some(tick_votes) = inner.votes.get(&(game_id.to_string(), tick_id)) else {
                return Ok(VoteTally {
                    winning_action: Action::FALLBACK,
                    vote_counts: HashMap::new(),
                    total_votes: 0,
                });
            };

            let mut vote_counts: HashMap<Action, u64> = HashMap::new();
            let mut first_ts: HashMap<Action, i64> = HashMap::new();
            for (action, ts) in tick_votes.values() {
                *vote_counts.entry(*action).or_insert(0) += 1;
                first_ts
                    .entry(*action)
                    .and_modify(|t| *t = (*t).min(*ts))
                    .or_insert(*ts);
            }
            let total_votes = vote_counts.values().sum();

            let winning_action = vote_counts
                .iter()
                .max_by(|a, b| {
                    a.1.cmp(b.1)
                        .then_with(|| first_ts[b.0].cmp(&first_ts[a.0]))
                })
                .map(|(action, _)| *action)
                .unwrap_or(Action::FALLBACK);

            Ok(VoteTally {
                winning_action,
                vote_counts,
                total_votes,
            })
        }

        async fn list_votes(&self, game_id: &str, tick_id: u64) -> Result<Vec<(String, Action, i64)>, StoreError> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .votes
                .get(&(game_id.to_string(), tick_id))
                .map(|tick_votes| {
                    tick_votes
                        .iter()
                        .map(|(agent_id, (action, ts))| (agent_id.clone(), *action, *ts))
                        .collect()
                })
                .unwrap_or_default())
        }

        async fn clear_votes(&self, game_id: &str, tick_id: u64) -> Result<(), StoreError> {
            let mut inner = self.inner.lock().unwrap();
            inner.votes.remove(&(game_id.to_string(), tick_id));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeStore;
    use super::*;

    #[tokio::test]
    async fn rate_limiter_allows_burst_then_throttles() {
        let store = FakeStore::new();
        for _ in 0..5 {
            let result = store.take_rate_limit_token("agent-1", 1.0, 5.0, 0).await.unwrap();
            assert!(result.allowed);
        }
        let sixth = store.take_rate_limit_token("agent-1", 1.0, 5.0, 0).await.unwrap();
        assert!(!sixth.allowed);
        assert!(sixth.retry_after_ms > 0);
    }

    #[tokio::test]
    async fn rate_limiter_refills_over_time() {
        let store = FakeStore::new();
        for _ in 0..5 {
            store.take_rate_limit_token("agent-1", 1.0, 5.0, 0).await.unwrap();
        }
        let later = store.take_rate_limit_token("agent-1", 1.0, 5.0, 2000).await.unwrap();
        assert!(later.allowed);
    }

    #[tokio::test]
    async fn vote_tally_breaks_ties_by_earliest_timestamp() {
        let store = FakeStore::new();
        store.record_vote("game", 1, "a1", Action::Up, 100).await.unwrap();
        store.record_vote("game", 1, "a2", Action::Down, 50).await.unwrap();
        let tally = store.tally_votes("game", 1).await.unwrap();
        assert_eq!(tally.winning_action, Action::Down);
        assert_eq!(tally.total_votes, 2);
    }

    #[tokio::test]
    async fn vote_tally_falls_back_when_empty() {
        let store = FakeStore::new();
        let tally = store.tally_votes("game", 1).await.unwrap();
        assert_eq!(tally.winning_action, Action::FALLBACK);
        assert_eq!(tally.total_votes, 0);
    }

    #[tokio::test]
    async fn a_repeated_vote_from_the_same_agent_supersedes_the_old_one() {
        let store = FakeStore::new();
        store.record_vote("game", 1, "a1", Action::Up, 0).await.unwrap();
        store.record_vote("game", 1, "a1", Action::Down, 1).await.unwrap();
        let tally = store.tally_votes("game", 1).await.unwrap();
        assert_eq!(tally.total_votes, 1);
        assert_eq!(tally.winning_action, Action::Down);
    }

    #[tokio::test]
    async fn clear_votes_removes_the_tick() {
        let store = FakeStore::new();
        store.record_vote("game", 1, "a1", Action::Up, 0).await.unwrap();
        store.clear_votes("game", 1).await.unwrap();
        let tally = store.tally_votes("game", 1).await.unwrap();
        assert_eq!(tally.total_votes, 0);
    }

    #[tokio::test]
    async fn list_votes_returns_the_actual_per_agent_casts() {
        let store = FakeStore::new();
        store.record_vote("game", 1, "a1", Action::Up, 100).await.unwrap();
        store.record_vote("game", 1, "a2", Action::Down, 200).await.unwrap();
        let mut votes = store.list_votes("game", 1).await.unwrap();
        votes.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(votes, vec![
            ("a1".to_string(), Action::Up, 100),
            ("a2".to_string(), Action::Down, 200),
        ]);
    }

    #[tokio::test]
    async fn hset_nx_only_sets_an_unoccupied_field() {
        let store = FakeStore::new();
        assert!(store.hset_nx("idx", "agent-1", "a").await.unwrap());
        assert!(!store.hset_nx("idx", "agent-1", "b").await.unwrap());
        assert_eq!(store.hget("idx", "agent-1").await.unwrap(), Some("a".to_string()));
    }

    #[tokio::test]
    async fn a_subscriber_receives_published_messages() {
        use futures_util::StreamExt;
        let store = FakeStore::new();
        let mut stream = store.subscribe("state-updates").await.unwrap();
        store.publish("state-updates", "hello").await.unwrap();
        assert_eq!(stream.next().await, Some("hello".to_string()));
    }
}
