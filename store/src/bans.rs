//! Ban registry (spec §4.4): agent/IP/CIDR/user-agent bans with hard/soft
//! precedence, a 60 s in-process cache, and violation-triggered
//! auto-escalation.

use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::kv::KvStore;

const BANS_KEY: &str = "bans";
const CACHE_TTL: Duration = Duration::from_secs(60);
/// Violations older than this don't count toward the threshold (spec §4.4
/// doesn't pin an exact window; five minutes is this implementation's choice).
const VIOLATION_WINDOW_MS: i64 = 5 * 60 * 1_000;
/// Auto-escalated bans expire after this long (spec §4.4: "time-limited").
const AUTO_BAN_DURATION_MS: i64 = 60 * 60 * 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanMode {
    Hard,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BanKind {
    Agent,
    Ip,
    Cidr,
    UserAgent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanRecord {
    pub kind: BanKind,
    pub target: String,
    pub mode: BanMode,
    pub reason: String,
    pub expires_at_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    RateLimit,
    InvalidRequest,
}

#[derive(Debug, Clone)]
pub struct BanCheck {
    pub banned: bool,
    pub mode: Option<BanMode>,
    pub reason: Option<String>,
    pub expires_at_ms: Option<i64>,
}

struct CacheEntry {
    check: BanCheck,
    cached_at: Instant,
}

pub struct BanRegistry {
    kv: Arc<dyn KvStore>,
    cache: Mutex<HashMap<String, CacheEntry>>,
}

/// Violations before a kind auto-escalates into a ban (spec §4.4 doesn't
/// pin an exact number; five strikes is this implementation's choice).
const VIOLATION_THRESHOLD: u32 = 5;

impl BanRegistry {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Consults agent ban, then IP ban, then CIDR bans, then user-agent
    /// regex bans (spec §4.4 order), hard winning over soft, ignoring any
    /// record whose `expires_at_ms` has already passed. Cached for 60 s per
    /// `agent_id` since that's the identity agents check most often.
    pub async fn check_ban(
        &self,
        agent_id: &str,
        ip: &str,
        user_agent: &str,
        now_ms: i64,
    ) -> Result<BanCheck, StoreError> {
        if let Some(entry) = self.cache.lock().unwrap().get(agent_id) {
            if entry.cached_at.elapsed() < CACHE_TTL {
                return Ok(entry.check.clone());
            }
        }

        let records: Vec<BanRecord> = self
            .all_bans()
            .await?
            .into_iter()
            .filter(|r| r.expires_at_ms.map(|expires| expires > now_ms).unwrap_or(true))
            .collect();
        let mut candidates: Vec<&BanRecord> = Vec::new();

        if let Some(r) = records.iter().find(|r| r.kind == BanKind::Agent && r.target == agent_id) {
            candidates.push(r);
        }
        if let Some(r) = records.iter().find(|r| r.kind == BanKind::Ip && r.target == ip) {
            candidates.push(r);
        }
        if let Ok(parsed_ip) = IpAddr::from_str(ip) {
            candidates.extend(
                records
                    .iter()
                    .filter(|r| r.kind == BanKind::Cidr && cidr_contains(&r.target, parsed_ip)),
            );
        }
        candidates.extend(records.iter().filter(|r| {
            r.kind == BanKind::UserAgent
                && Regex::new(&r.target)
                    .map(|re| re.is_match(user_agent))
                    .unwrap_or(false)
        }));

        let winner = candidates
            .into_iter()
            .max_by_key(|r| matches!(r.mode, BanMode::Hard));

        let check = match winner {
            Some(r) => BanCheck {
                banned: true,
                mode: Some(r.mode),
                reason: Some(r.reason.clone()),
                expires_at_ms: r.expires_at_ms,
            },
            None => BanCheck {
                banned: false,
                mode: None,
                reason: None,
                expires_at_ms: None,
            },
        };

        self.cache.lock().unwrap().insert(
            agent_id.to_string(),
            CacheEntry {
                check: check.clone(),
                cached_at: Instant::now(),
            },
        );
        Ok(check)
    }

    pub async fn add_ban(&self, record: BanRecord) -> Result<(), StoreError> {
        let key = ban_key(record.kind, &record.target);
        let value = serde_json::to_string(&record).map_err(|e| StoreError::Backend(e.to_string()))?;
        self.kv.hset(BANS_KEY, &key, &value).await?;
        self.invalidate_cache();
        Ok(())
    }

    pub async fn remove_ban(&self, kind: BanKind, target: &str) -> Result<(), StoreError> {
        self.kv.hdel(BANS_KEY, &ban_key(kind, target)).await?;
        self.invalidate_cache();
        Ok(())
    }

    pub async fn list_bans(&self) -> Result<Vec<BanRecord>, StoreError> {
        self.all_bans().await
    }

    /// Records a violation for `agent_id` in the KV store, keyed by
    /// timestamp so every replica sees the same rolling-window count, and
    /// past the threshold within [`VIOLATION_WINDOW_MS`] auto-creates a
    /// time-limited ban (spec §4.4): rate-limit violations escalate to an
    /// agent-soft ban, invalid-request violations escalate to an IP-hard ban.
    pub async fn record_violation(
        &self,
        agent_id: &str,
        ip: &str,
        kind: ViolationKind,
        now_ms: i64,
    ) -> Result<(), StoreError> {
        let key = violations_key(agent_id, &kind);
        self.kv.hset(&key, &now_ms.to_string(), &now_ms.to_string()).await?;

        let recorded = self.kv.hgetall(&key).await?;
        let mut count = 0u32;
        for (field, ts) in &recorded {
            let within_window = ts.parse::<i64>().map(|ts| now_ms - ts <= VIOLATION_WINDOW_MS).unwrap_or(false);
            if within_window {
                count += 1;
            } else {
                self.kv.hdel(&key, field).await?;
            }
        }

        if count >= VIOLATION_THRESHOLD {
            let record = match kind {
                ViolationKind::RateLimit => BanRecord {
                    kind: BanKind::Agent,
                    target: agent_id.to_string(),
                    mode: BanMode::Soft,
                    reason: "repeated rate-limit violations".to_string(),
                    expires_at_ms: Some(now_ms + AUTO_BAN_DURATION_MS),
                },
                ViolationKind::InvalidRequest => BanRecord {
                    kind: BanKind::Ip,
                    target: ip.to_string(),
                    mode: BanMode::Hard,
                    reason: "repeated invalid requests".to_string(),
                    expires_at_ms: Some(now_ms + AUTO_BAN_DURATION_MS),
                },
            };
            self.add_ban(record).await?;
        }
        Ok(())
    }

    async fn all_bans(&self) -> Result<Vec<BanRecord>, StoreError> {
        let raw = self.kv.hgetall(BANS_KEY).await?;
        Ok(raw
            .values()
            .filter_map(|v| serde_json::from_str(v).ok())
            .collect())
    }

    fn invalidate_cache(&self) {
        self.cache.lock().unwrap().clear();
    }
}

fn ban_key(kind: BanKind, target: &str) -> String {
    format!("{kind:?}:{target}")
}

fn violations_key(agent_id: &str, kind: &ViolationKind) -> String {
    format!("violations:{agent_id}:{kind:?}")
}

/// Linear-scan CIDR containment check over a modest set of bans (spec
/// §4.4: "linear scan over a modest set"), IPv4 only.
fn cidr_contains(cidr: &str, ip: IpAddr) -> bool {
    let IpAddr::V4(ip) = ip else { return false };
    let Some((base, bits)) = cidr.split_once('/') else {
        return false;
    };
    let Ok(base) = base.parse::<std::net::Ipv4Addr>() else {
        return false;
    };
    let Ok(bits) = bits.parse::<u32>() else {
        return false;
    };
    if bits > 32 {
        return false;
    }
    let mask = if bits == 0 { 0 } else { u32::MAX << (32 - bits) };
    u32::from(base) & mask == u32::from(ip) & mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::fake::FakeStore;

    fn registry() -> BanRegistry {
        BanRegistry::new(Arc::new(FakeStore::new()))
    }

    #[tokio::test]
    async fn unbanned_agent_passes() {
        let registry = registry();
        let check = registry.check_ban("agent-1", "1.2.3.4", "curl/8", 0).await.unwrap();
        assert!(!check.banned);
    }

    #[tokio::test]
    async fn agent_ban_is_detected() {
        let registry = registry();
        registry
            .add_ban(BanRecord {
                kind: BanKind::Agent,
                target: "agent-1".to_string(),
                mode: BanMode::Hard,
                reason: "cheating".to_string(),
                expires_at_ms: None,
            })
            .await
            .unwrap();
        let check = registry.check_ban("agent-1", "1.2.3.4", "curl/8", 0).await.unwrap();
        assert!(check.banned);
        assert_eq!(check.mode, Some(BanMode::Hard));
    }

    #[tokio::test]
    async fn cidr_ban_matches_contained_ip() {
        let registry = registry();
        registry
            .add_ban(BanRecord {
                kind: BanKind::Cidr,
                target: "10.0.0.0/8".to_string(),
                mode: BanMode::Soft,
                reason: "abuse range".to_string(),
                expires_at_ms: None,
            })
            .await
            .unwrap();
        let check = registry.check_ban("agent-2", "10.1.2.3", "curl/8", 0).await.unwrap();
        assert!(check.banned);
    }

    #[tokio::test]
    async fn hard_ban_wins_over_soft() {
        let registry = registry();
        registry
            .add_ban(BanRecord {
                kind: BanKind::Agent,
                target: "agent-1".to_string(),
                mode: BanMode::Soft,
                reason: "warned".to_string(),
                expires_at_ms: None,
            })
            .await
            .unwrap();
        registry
            .add_ban(BanRecord {
                kind: BanKind::Ip,
                target: "9.9.9.9".to_string(),
                mode: BanMode::Hard,
                reason: "banned range".to_string(),
                expires_at_ms: None,
            })
            .await
            .unwrap();
        let check = registry.check_ban("agent-1", "9.9.9.9", "curl/8", 0).await.unwrap();
        assert_eq!(check.mode, Some(BanMode::Hard));
    }

    #[tokio::test]
    async fn an_expired_ban_no_longer_applies() {
        let registry = registry();
        registry
            .add_ban(BanRecord {
                kind: BanKind::Agent,
                target: "agent-1".to_string(),
                mode: BanMode::Hard,
                reason: "temporary".to_string(),
                expires_at_ms: Some(1_000),
            })
            .await
            .unwrap();
        let check = registry.check_ban("agent-1", "1.2.3.4", "curl/8", 2_000).await.unwrap();
        assert!(!check.banned);
    }

    #[tokio::test]
    async fn repeated_rate_limit_violations_auto_ban() {
        let registry = registry();
        for i in 0..VIOLATION_THRESHOLD {
            registry
                .record_violation("agent-1", "1.2.3.4", ViolationKind::RateLimit, i as i64)
                .await
                .unwrap();
        }
        let check = registry.check_ban("agent-1", "1.2.3.4", "curl/8", VIOLATION_THRESHOLD as i64).await.unwrap();
        assert!(check.banned);
        assert_eq!(check.mode, Some(BanMode::Soft));
    }

    #[tokio::test]
    async fn violations_outside_the_window_do_not_count() {
        let registry = registry();
        registry
            .record_violation("agent-1", "1.2.3.4", ViolationKind::RateLimit, 0)
            .await
            .unwrap();
        for i in 0..VIOLATION_THRESHOLD - 1 {
            registry
                .record_violation(
                    "agent-1",
                    "1.2.3.4",
                    ViolationKind::RateLimit,
                    VIOLATION_WINDOW_MS + 1_000 + i as i64,
                )
                .await
                .unwrap();
        }
        let check = registry
            .check_ban("agent-1", "1.2.3.4", "curl/8", VIOLATION_WINDOW_MS + 1_000 + VIOLATION_THRESHOLD as i64)
            .await
            .unwrap();
        assert!(!check.banned);
    }
}
