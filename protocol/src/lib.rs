//! Shared wire schemas and the game-state document, used by `store`,
//! `decoder`, `backend` and `relay-server` alike. This crate does no I/O —
//! it only defines types, their JSON shape, and the invariants from spec §3.

pub mod action;
pub mod error_code;
pub mod plan;
pub mod state;
pub mod wire;

pub use action::Action;
pub use plan::{Plan, RateLimitParams};
pub use state::{GameState, Phase, StateInvariantError};
