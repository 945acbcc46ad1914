//! The message catalogue from spec §6. Every message is a tagged union
//! discriminated by a `type` field; unknown `type` values deserialize into
//! an `Unknown` variant instead of failing, so the receiving side can drop
//! them with a warning rather than tearing down the connection.

use crate::action::Action;
use crate::state::GameState;
use serde::{Deserialize, Serialize};

/// One agent's vote for a `(game_id, tick_id)`, as carried in a `vote_batch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub agent_id: String,
    pub action: Action,
    pub timestamp: i64,
}

/// The first message a home client sends on `WS /home/connect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeAuth {
    pub secret: String,
}

/// Messages the relay sends to the authenticated home client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RelayToHome {
    VoteBatch {
        tick_id: u64,
        game_id: String,
        votes: Vec<VoteRecord>,
    },
    Heartbeat {
        timestamp: i64,
    },
    Error {
        code: String,
        message: String,
    },
    /// Loopback echo of a state update; informational only, the home client
    /// must ignore it rather than reprocess its own push.
    StateUpdate {
        tick_id: u64,
        game_id: String,
        state: Box<GameState>,
    },
    #[serde(other)]
    Unknown,
}

/// Messages the home client sends to the relay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum HomeToRelay {
    StatePush {
        tick_id: u64,
        game_id: String,
        state: Box<GameState>,
    },
    HeartbeatAck {
        timestamp: i64,
    },
    VotesRequest {
        tick_id: u64,
        game_id: String,
    },
    #[serde(other)]
    Unknown,
}

/// Messages the relay sends to an agent on `WS /agent/stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RelayToAgent {
    StateUpdate {
        tick_id: u64,
        game_id: String,
        state: Box<GameState>,
    },
    Error {
        code: String,
        message: String,
    },
}

/// Any inbound message on the read-only agent stream is invalid by
/// construction (spec §6): the server always answers with this error.
pub const NOT_SUPPORTED: &str = "NOT_SUPPORTED";

// ---------------------------------------------------------------------
// HTTP request/response bodies
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub agent_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub api_key: String,
    pub agent_id: String,
    pub plan: crate::plan::Plan,
    pub rps_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    pub action: Action,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub accepted: bool,
    pub tick: u64,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: i64,
    pub home_connected: bool,
    pub cached_state_tick: Option<u64>,
    pub buffered_votes: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BanMode {
    Hard,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Agent,
    Ip,
    Cidr,
    UserAgentRegex,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBanRequest {
    pub target: String,
    pub mode: BanMode,
    pub reason: String,
    pub duration_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUnbanRequest {
    pub target: String,
    pub target_kind: TargetKind,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BanRecordView {
    pub target: String,
    pub target_kind: TargetKind,
    pub mode: BanMode,
    pub reason: String,
    pub expires_at: Option<i64>,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_relay_to_home_message_type_is_dropped_not_rejected() {
        let raw = serde_json::json!({"type": "some_future_message", "foo": 1});
        let parsed: RelayToHome = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed, RelayToHome::Unknown);
    }

    #[test]
    fn unknown_home_to_relay_message_type_is_dropped_not_rejected() {
        let raw = serde_json::json!({"type": "nonsense"});
        let parsed: HomeToRelay = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed, HomeToRelay::Unknown);
    }

    #[test]
    fn heartbeat_ack_round_trips() {
        let msg = HomeToRelay::HeartbeatAck { timestamp: 42 };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            serde_json::from_str::<HomeToRelay>(&json).unwrap(),
            msg
        );
    }
}
