//! Agent subscription plans and the fixed rps/burst table from spec §3.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Standard,
    Premium,
}

/// Token-bucket parameters for a plan: `(requests per second, burst capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitParams {
    pub rps: u32,
    pub burst: u32,
}

impl Plan {
    pub fn rate_limit(self) -> RateLimitParams {
        match self {
            Plan::Free => RateLimitParams { rps: 5, burst: 8 },
            Plan::Standard => RateLimitParams { rps: 20, burst: 30 },
            Plan::Premium => RateLimitParams { rps: 100, burst: 150 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_plan_matches_spec_table() {
        assert_eq!(Plan::Free.rate_limit(), RateLimitParams { rps: 5, burst: 8 });
        assert_eq!(Plan::Standard.rate_limit(), RateLimitParams { rps: 20, burst: 30 });
        assert_eq!(Plan::Premium.rate_limit(), RateLimitParams { rps: 100, burst: 150 });
    }
}
