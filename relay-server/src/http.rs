//! The public HTTP surface (spec §6): registration, voting, cached-state
//! reads, and the health probe. Every handler returns `Result<_, ApiError>`
//! so `?` does the status-code mapping via [`ApiError`]'s `IntoResponse`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use protocol::wire::{HealthResponse, RegisterRequest, RegisterResponse, VoteRequest, VoteResponse};

use crate::auth::{check_soft_ban, require_registration_secret, AuthenticatedAgent};
use crate::error::ApiError;
use crate::state::{AppState, AGENT_GAME_ID};

pub async fn register(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    require_registration_secret(&state, &headers)?;

    let agent_id = body.agent_id.trim();
    if agent_id.is_empty() || agent_id.len() > 64 {
        return Err(ApiError::Validation("agentId must be 1-64 characters".to_string()));
    }

    let (token, metadata) = state
        .credentials
        .register(agent_id, crate::state::now_ms())
        .await
        .map_err(|err| match err {
            store::StoreError::AgentExists(id) => ApiError::AgentExists(id),
            other => ApiError::Store(other),
        })?;

    Ok(Json(RegisterResponse {
        api_key: token,
        agent_id: metadata.agent_id,
        plan: metadata.plan,
        rps_limit: metadata.plan.rate_limit().rps,
    }))
}

pub async fn vote(
    State(state): State<Arc<AppState>>,
    agent: AuthenticatedAgent,
    Json(body): Json<VoteRequest>,
) -> Result<(axum::http::StatusCode, Json<VoteResponse>), ApiError> {
    check_soft_ban(&state, &agent.agent_id, &agent.ip, &agent.user_agent).await?;

    let limit = state.rate_limiter.check(&agent.agent_id, agent.plan, crate::state::now_ms()).await?;
    if !limit.allowed {
        state
            .bans
            .record_violation(&agent.agent_id, &agent.ip, store::ViolationKind::RateLimit, crate::state::now_ms())
            .await?;
        return Err(ApiError::RateLimited { retry_after_ms: limit.retry_after_ms });
    }

    let tick_id = state
        .cached_state
        .read()
        .await
        .as_ref()
        .map(|(tick, _)| *tick)
        .unwrap_or(0);

    state
        .votes
        .record_vote(AGENT_GAME_ID, tick_id, &agent.agent_id, body.action, crate::state::now_ms())
        .await?;
    state.scoreboard.record_accepted_vote(&agent.agent_id, tick_id, body.action);

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(VoteResponse {
            accepted: true,
            tick: tick_id,
            action: body.action,
        }),
    ))
}

pub async fn get_state(
    State(state): State<Arc<AppState>>,
    agent: AuthenticatedAgent,
) -> Result<Json<protocol::GameState>, ApiError> {
    check_soft_ban(&state, &agent.agent_id, &agent.ip, &agent.user_agent).await?;
    let cached = state.cached_state.read().await;
    let (_, game_state) = cached.as_ref().ok_or(ApiError::StateUnavailable)?;

    let mut game_state = game_state.clone();
    game_state.your_score = state.scoreboard.score(&agent.agent_id);
    game_state.your_rank = state.scoreboard.rank(&agent.agent_id);
    game_state.streak = state.scoreboard.streak(&agent.agent_id);
    game_state.total_agents = state.scoreboard.total_agents();
    Ok(Json(game_state))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let cached_state_tick = state.cached_state_tick().await;
    let buffered_votes = match state.votes.tally(AGENT_GAME_ID, cached_state_tick.unwrap_or(0)).await {
        Ok(tally) => tally.total_votes as usize,
        Err(_) => 0,
    };

    Json(HealthResponse {
        status: "ok",
        time: crate::state::now_ms(),
        home_connected: state.home_connected(),
        cached_state_tick,
        buffered_votes,
    })
}
