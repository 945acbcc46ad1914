//! Ban management endpoints (spec §6), gated by `X-Admin-Secret`. Request
//! and response bodies live in [`protocol::wire`]; this module only
//! translates between those wire types and [`store::bans`]'s internal ones.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use protocol::wire::{AdminBanRequest, AdminUnbanRequest, BanRecordView, BanMode as WireBanMode, TargetKind};
use store::{BanKind, BanMode as StoreBanMode, BanRecord};

use crate::auth::require_admin_secret;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn ban(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Json(body): Json<AdminBanRequest>,
) -> Result<Json<BanRecordView>, ApiError> {
    require_admin_secret(&state, &headers)?;

    let kind = parse_path_kind(&kind)?;
    let expires_at_ms = body
        .duration_seconds
        .map(|seconds| crate::state::now_ms() + (seconds as i64) * 1000);

    let record = BanRecord {
        kind,
        target: body.target.clone(),
        mode: to_store_mode(body.mode),
        reason: body.reason.clone(),
        expires_at_ms,
    };
    state.bans.add_ban(record.clone()).await?;

    Ok(Json(to_view(&record, crate::state::now_ms())))
}

pub async fn unban(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AdminUnbanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    require_admin_secret(&state, &headers)?;
    state.bans.remove_ban(to_store_kind(body.target_kind), &body.target).await?;
    Ok(Json(serde_json::json!({ "removed": true })))
}

pub async fn list_bans(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BanRecordView>>, ApiError> {
    require_admin_secret(&state, &headers)?;
    let records = state.bans.list_bans().await?;
    let now = crate::state::now_ms();
    Ok(Json(records.iter().map(|r| to_view(r, now)).collect()))
}

fn parse_path_kind(segment: &str) -> Result<BanKind, ApiError> {
    match segment {
        "agent" => Ok(BanKind::Agent),
        "ip" => Ok(BanKind::Ip),
        "cidr" => Ok(BanKind::Cidr),
        "user-agent" => Ok(BanKind::UserAgent),
        other => Err(ApiError::Validation(format!("unknown ban kind {other}"))),
    }
}

fn to_store_mode(mode: WireBanMode) -> StoreBanMode {
    match mode {
        WireBanMode::Hard => StoreBanMode::Hard,
        WireBanMode::Soft => StoreBanMode::Soft,
    }
}

fn to_wire_mode(mode: StoreBanMode) -> WireBanMode {
    match mode {
        StoreBanMode::Hard => WireBanMode::Hard,
        StoreBanMode::Soft => WireBanMode::Soft,
    }
}

fn to_store_kind(kind: TargetKind) -> BanKind {
    match kind {
        TargetKind::Agent => BanKind::Agent,
        TargetKind::Ip => BanKind::Ip,
        TargetKind::Cidr => BanKind::Cidr,
        TargetKind::UserAgentRegex => BanKind::UserAgent,
    }
}

fn to_wire_kind(kind: BanKind) -> TargetKind {
    match kind {
        BanKind::Agent => TargetKind::Agent,
        BanKind::Ip => TargetKind::Ip,
        BanKind::Cidr => TargetKind::Cidr,
        BanKind::UserAgent => TargetKind::UserAgentRegex,
    }
}

/// `store::BanRecord` doesn't track when a ban was created, so `created_at`
/// here is always "now" rather than the ban's actual origin time.
fn to_view(record: &BanRecord, created_at: i64) -> BanRecordView {
    BanRecordView {
        target: record.target.clone(),
        target_kind: to_wire_kind(record.kind),
        mode: to_wire_mode(record.mode),
        reason: record.reason.clone(),
        expires_at: record.expires_at_ms,
        created_at,
    }
}
