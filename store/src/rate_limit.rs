//! Thin convenience wrapper over [`KvStore::take_rate_limit_token`] (spec
//! §4.3) so callers deal in [`Plan`] rather than raw rps/burst numbers.

use std::sync::Arc;

use protocol::Plan;

use crate::error::StoreError;
use crate::kv::{KvStore, RateLimitResult};

pub struct RateLimiter {
    kv: Arc<dyn KvStore>,
}

impl RateLimiter {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn check(
        &self,
        agent_id: &str,
        plan: Plan,
        now_ms: i64,
    ) -> Result<RateLimitResult, StoreError> {
        let params = plan.rate_limit();
        self.kv
            .take_rate_limit_token(agent_id, params.rps as f64, params.burst as f64, now_ms)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::fake::FakeStore;

    #[tokio::test]
    async fn free_plan_throttles_past_its_burst() {
        let limiter = RateLimiter::new(Arc::new(FakeStore::new()));
        let mut last_allowed = true;
        for _ in 0..9 {
            last_allowed = limiter.check("agent-1", Plan::Free, 0).await.unwrap().allowed;
        }
        assert!(!last_allowed);
    }

    #[tokio::test]
    async fn premium_plan_has_a_much_larger_burst() {
        let limiter = RateLimiter::new(Arc::new(FakeStore::new()));
        for _ in 0..100 {
            let result = limiter.check("agent-1", Plan::Premium, 0).await.unwrap();
            assert!(result.allowed);
        }
    }
}
