//! Credential store (spec §4.2): `agentId` registration, token lookup and
//! revocation. Tokens are shown once; only their SHA-256 digest is ever
//! persisted, matching the pack's own approach to credential handling
//! (digest-at-rest, never raw secrets).

use std::collections::HashMap;
use std::sync::Arc;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::StoreError;
use crate::kv::KvStore;
use protocol::Plan;

const CREDENTIALS_KEY: &str = "credentials";
const AGENT_INDEX_KEY: &str = "credentials:agents";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialMetadata {
    pub agent_id: String,
    pub plan: Plan,
    pub created_at_ms: i64,
}

pub struct CredentialStore {
    kv: Arc<dyn KvStore>,
}

impl CredentialStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Registers a brand-new agent, returning the token to hand back to the
    /// caller exactly once. Fails with [`StoreError::AgentExists`] if the
    /// `agentId` is already reserved. The reservation itself is a single
    /// atomic `HSETNX` (spec §4.2) so two concurrent registrations of the
    /// same `agentId` can't both succeed.
    pub async fn register(
        &self,
        agent_id: &str,
        now_ms: i64,
    ) -> Result<(String, CredentialMetadata), StoreError> {
        let token = generate_token();
        let digest = digest_token(&token);

        if !self.kv.hset_nx(AGENT_INDEX_KEY, agent_id, &digest).await? {
            return Err(StoreError::AgentExists(agent_id.to_string()));
        }

        let metadata = CredentialMetadata {
            agent_id: agent_id.to_string(),
            plan: Plan::Free,
            created_at_ms: now_ms,
        };
        self.kv
            .hset(
                CREDENTIALS_KEY,
                &digest,
                &serde_json::to_string(&metadata).map_err(|e| StoreError::Backend(e.to_string()))?,
            )
            .await?;

        Ok((token, metadata))
    }

    /// Looks up the metadata for a presented token. The digest comparison
    /// itself (`HGET` by digest) is effectively constant-time since it's a
    /// direct key lookup rather than a byte-by-byte scan.
    pub async fn lookup(&self, token: &str) -> Result<Option<CredentialMetadata>, StoreError> {
        let digest = digest_token(token);
        let Some(raw) = self.kv.hget(CREDENTIALS_KEY, &digest).await? else {
            return Ok(None);
        };
        let metadata: CredentialMetadata =
            serde_json::from_str(&raw).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(Some(metadata))
    }

    /// Deletes both the digest record and the `agentId` reservation.
    pub async fn revoke(&self, agent_id: &str) -> Result<(), StoreError> {
        if let Some(digest) = self.kv.hget(AGENT_INDEX_KEY, agent_id).await? {
            self.kv.hdel(CREDENTIALS_KEY, &digest).await?;
        }
        self.kv.hdel(AGENT_INDEX_KEY, agent_id).await?;
        Ok(())
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("cgp_{}", hex::encode(bytes))
}

fn digest_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Minimal hex encoding so this module doesn't need to pull in the full
/// `hex` crate for a handful of bytes.
mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        use std::fmt::Write;
        let mut out = String::with_capacity(bytes.as_ref().len() * 2);
        for b in bytes.as_ref() {
            write!(out, "{b:02x}").unwrap();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::fake::FakeStore;

    fn store() -> CredentialStore {
        CredentialStore::new(Arc::new(FakeStore::new()))
    }

    #[tokio::test]
    async fn register_then_lookup_round_trips() {
        let store = store();
        let (token, metadata) = store.register("agent-1", 0).await.unwrap();
        assert!(token.starts_with("cgp_"));
        assert_eq!(metadata.plan, Plan::Free);

        let looked_up = store.lookup(&token).await.unwrap().expect("token found");
        assert_eq!(looked_up.agent_id, "agent-1");
    }

    #[tokio::test]
    async fn duplicate_registration_fails() {
        let store = store();
        store.register("agent-1", 0).await.unwrap();
        let err = store.register("agent-1", 0).await.unwrap_err();
        assert!(matches!(err, StoreError::AgentExists(_)));
    }

    #[tokio::test]
    async fn concurrent_registration_of_the_same_agent_id_only_lets_one_win() {
        let store = store();
        let (a, b) = tokio::join!(store.register("agent-1", 0), store.register("agent-1", 0));
        let results = [a, b];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter(|r| r.is_err())
            .all(|r| matches!(r, Err(StoreError::AgentExists(_)))));
    }

    #[tokio::test]
    async fn unknown_token_returns_none() {
        let store = store();
        assert!(store.lookup("cgp_nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn revoke_removes_both_records() {
        let store = store();
        let (token, _) = store.register("agent-1", 0).await.unwrap();
        store.revoke("agent-1").await.unwrap();
        assert!(store.lookup(&token).await.unwrap().is_none());
        // Re-registration succeeds once revoked.
        store.register("agent-1", 0).await.unwrap();
    }
}
