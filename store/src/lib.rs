//! Shared mutable state for the relay and back end: the KV/pub-sub adapter
//! (C1), credential store (C2), rate limiter (C3), ban registry (C4), and
//! vote aggregator (C5). All Redis access funnels through [`KvStore`] so
//! the rest of the crate can run against [`kv::fake::FakeStore`] in tests.

pub mod bans;
pub mod credentials;
pub mod error;
pub mod kv;
pub mod rate_limit;
pub mod scoreboard;
pub mod votes;

pub use bans::{BanCheck, BanKind, BanMode, BanRecord, BanRegistry, ViolationKind};
pub use credentials::{CredentialMetadata, CredentialStore};
pub use error::StoreError;
pub use kv::{fake::FakeStore, redis_store::RedisStore, KvStore, RateLimitResult, VoteTally};
pub use rate_limit::RateLimiter;
pub use scoreboard::Scoreboard;
pub use votes::VoteAggregator;
