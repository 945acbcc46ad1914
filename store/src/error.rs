use thiserror::Error;

/// Failures surfaced by the KV/pub-sub adapter and everything built on it.
/// Callers see these as fail-fast: a store error aborts the current
/// operation rather than retrying internally (reconnection is handled
/// transparently below this layer by `redis`'s connection manager).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend unavailable: {0}")]
    Backend(String),
    #[error("agent {0} already registered")]
    AgentExists(String),
    #[error("no credential record for the presented token")]
    UnknownToken,
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}
