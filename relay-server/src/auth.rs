//! Request authentication and client-IP resolution (spec §4.9, §9
//! "Proxy-IP trust"). An [`AuthenticatedAgent`] is an axum extractor so
//! handlers just declare it as a parameter instead of repeating the
//! header-lookup dance.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::TrustProxy;
use crate::error::ApiError;
use crate::state::AppState;
use protocol::Plan;

const API_KEY_HEADER: &str = "x-api-key";
const ADMIN_SECRET_HEADER: &str = "x-admin-secret";
const REGISTRATION_SECRET_HEADER: &str = "x-registration-secret";
const CF_CONNECTING_IP_HEADER: &str = "cf-connecting-ip";
const X_FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// An agent that presented a valid, unbanned, unthrottled API key.
pub struct AuthenticatedAgent {
    pub agent_id: String,
    pub plan: Plan,
    pub ip: String,
    pub user_agent: String,
}

impl FromRequestParts<Arc<AppState>> for AuthenticatedAgent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::MissingAuth)?;

        let metadata = state
            .credentials
            .lookup(token)
            .await?
            .ok_or(ApiError::InvalidAuth)?;

        let ip = client_ip(&parts.headers, parts.extensions.get::<ConnectInfo<SocketAddr>>(), state.config.trust_proxy);
        let user_agent = parts
            .headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let ban = state
            .bans
            .check_ban(&metadata.agent_id, &ip, &user_agent, crate::state::now_ms())
            .await?;
        if let Some(store::BanMode::Hard) = ban.mode {
            return Err(ApiError::Banned(ban.reason.unwrap_or_default()));
        }

        Ok(AuthenticatedAgent {
            agent_id: metadata.agent_id,
            plan: metadata.plan,
            ip,
            user_agent,
        })
    }
}

/// Extracted separately from [`AuthenticatedAgent`] so handlers that need
/// to record a rate-limit violation against a soft-banned agent can still
/// see the ban's reason rather than a bare rejection.
pub async fn check_soft_ban(state: &AppState, agent_id: &str, ip: &str, user_agent: &str) -> Result<(), ApiError> {
    let ban = state.bans.check_ban(agent_id, ip, user_agent, crate::state::now_ms()).await?;
    if let Some(store::BanMode::Soft) = ban.mode {
        return Err(ApiError::SoftBanned {
            reason: ban.reason.unwrap_or_default(),
            retry_after_ms: 1000,
        });
    }
    Ok(())
}

pub fn require_admin_secret(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let presented = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::InvalidAdminSecret)?;
    if presented != state.config.admin_secret {
        return Err(ApiError::InvalidAdminSecret);
    }
    Ok(())
}

pub fn require_registration_secret(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(expected) = &state.config.registration_secret else {
        return Ok(());
    };
    let presented = headers
        .get(REGISTRATION_SECRET_HEADER)
        .and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        return Err(ApiError::InvalidRegistrationSecret);
    }
    Ok(())
}

/// Resolves the client IP per the deployment's configured trust mode (spec
/// §9): never inferred automatically, since a spoofable header trusted by
/// mistake defeats every IP-based ban.
pub fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>, trust_proxy: TrustProxy) -> String {
    match trust_proxy {
        TrustProxy::Cloudflare => headers
            .get(CF_CONNECTING_IP_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| peer_ip(peer)),
        TrustProxy::Any => headers
            .get(X_FORWARDED_FOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| peer_ip(peer)),
        TrustProxy::None => peer_ip(peer),
    }
}

fn peer_ip(peer: Option<&ConnectInfo<SocketAddr>>) -> String {
    peer.map(|ConnectInfo(addr)| addr.ip().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn cloudflare_mode_reads_cf_connecting_ip() {
        let mut headers = HeaderMap::new();
        headers.insert(CF_CONNECTING_IP_HEADER, HeaderValue::from_static("203.0.113.7"));
        assert_eq!(client_ip(&headers, None, TrustProxy::Cloudflare), "203.0.113.7");
    }

    #[test]
    fn any_mode_takes_the_first_forwarded_for_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR_HEADER, HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_ip(&headers, None, TrustProxy::Any), "203.0.113.7");
    }

    #[test]
    fn none_mode_ignores_headers_entirely() {
        let mut headers = HeaderMap::new();
        headers.insert(CF_CONNECTING_IP_HEADER, HeaderValue::from_static("203.0.113.7"));
        assert_eq!(client_ip(&headers, None, TrustProxy::None), "");
    }
}
