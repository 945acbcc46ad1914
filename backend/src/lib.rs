//! The trusted back end (spec §4.7, §4.8, §4.10): the only process that
//! touches emulator RAM. Owns the tick pipeline, the phase watchdog that
//! drives it, and the outbound bridge that pushes decoded state to the
//! public relay.

pub mod config;
pub mod emulator;
pub mod error;
pub mod game_state_service;
pub mod home_client;
pub mod phase_supervisor;
pub mod tick_processor;

pub use config::Config;
pub use emulator::Emulator;
pub use error::TickError;
pub use game_state_service::GameStateService;
pub use home_client::HomeClient;
pub use phase_supervisor::{PhaseSupervisor, TickSink};
pub use tick_processor::{TickOutcome, TickProcessor};
