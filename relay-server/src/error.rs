//! The typed HTTP error surface (spec §6/§7): every rejected request comes
//! back as `{error, code}` with the status code the table in spec.md §6
//! pins for that failure.

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use protocol::error_code;
use protocol::wire::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request body")]
    ParseError,
    #[error("{0}")]
    Validation(String),
    #[error("unknown or invalid action")]
    InvalidAction,
    #[error("registration secret did not match")]
    InvalidRegistrationSecret,
    #[error("agent {0} already registered")]
    AgentExists(String),
    #[error("missing X-Api-Key header")]
    MissingAuth,
    #[error("invalid API key")]
    InvalidAuth,
    #[error("agent is banned: {0}")]
    Banned(String),
    #[error("rate limit exceeded")]
    RateLimited { retry_after_ms: u64 },
    #[error("agent is soft-banned: {0}")]
    SoftBanned { reason: String, retry_after_ms: u64 },
    #[error("no cached state on this replica yet")]
    StateUnavailable,
    #[error("invalid admin secret")]
    InvalidAdminSecret,
    #[error("store error: {0}")]
    Store(#[from] store::StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, retry_after_secs) = match &self {
            ApiError::ParseError => (StatusCode::BAD_REQUEST, error_code::PARSE_ERROR, None),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, error_code::VALIDATION_ERROR, None),
            ApiError::InvalidAction => (StatusCode::BAD_REQUEST, error_code::INVALID_ACTION, None),
            ApiError::InvalidRegistrationSecret => {
                (StatusCode::UNAUTHORIZED, error_code::INVALID_REGISTRATION_SECRET, None)
            }
            ApiError::AgentExists(_) => (StatusCode::CONFLICT, error_code::AGENT_EXISTS, None),
            ApiError::MissingAuth => (StatusCode::UNAUTHORIZED, error_code::MISSING_AUTH, None),
            ApiError::InvalidAuth | ApiError::InvalidAdminSecret => {
                (StatusCode::UNAUTHORIZED, error_code::INVALID_AUTH, None)
            }
            ApiError::Banned(_) => (StatusCode::FORBIDDEN, error_code::BANNED, None),
            ApiError::RateLimited { retry_after_ms } => {
                (StatusCode::TOO_MANY_REQUESTS, error_code::RATE_LIMITED, Some(retry_after_secs_ceil(*retry_after_ms)))
            }
            ApiError::SoftBanned { retry_after_ms, .. } => {
                (StatusCode::TOO_MANY_REQUESTS, error_code::SOFT_BANNED, Some(retry_after_secs_ceil(*retry_after_ms)))
            }
            ApiError::StateUnavailable => (StatusCode::SERVICE_UNAVAILABLE, error_code::STATE_UNAVAILABLE, None),
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, error_code::INTERNAL_ERROR, None),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        let mut response = (status, body).into_response();
        if let Some(seconds) = retry_after_secs {
            if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert("Retry-After", value);
            }
        }
        response
    }
}

fn retry_after_secs_ceil(ms: u64) -> u64 {
    ms.div_ceil(1000).max(1)
}
