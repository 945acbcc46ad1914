use std::sync::Arc;

use backend::config::Config;
use backend::emulator::mock::MockEmulator;
use backend::game_state_service::GameStateService;
use backend::home_client::HomeClient;
use backend::phase_supervisor::PhaseSupervisor;
use backend::tick_processor::TickProcessor;
use store::{RedisStore, Scoreboard, VoteAggregator};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
/// Activates structured tracing, loads config, wires the KV store, tick
/// processor, phase watchdog and outbound home client together, then runs
/// until signalled. The real emulator back end is pluggable (spec §6 calls
/// it an external collaborator); this entry point drives a [`MockEmulator`]
/// so the pipeline runs end to end even with no hardware attached.
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "invalid configuration");
            std::process::exit(1);
        }
    };

    let kv = match RedisStore::connect(&config.kv_url).await {
        Ok(kv) => Arc::new(kv),
        Err(error) => {
            tracing::error!(%error, "failed to connect to the KV store");
            std::process::exit(1);
        }
    };

    let votes = Arc::new(VoteAggregator::new(kv.clone()));
    let scoreboard = Arc::new(Scoreboard::new());
    let emulator = Arc::new(MockEmulator::new());

    let processor = TickProcessor::new("game-1", emulator.clone(), votes.clone(), scoreboard.clone());

    let (vote_tx, mut vote_rx) = mpsc::unbounded_channel();
    let mut home_client = HomeClient::new(
        config.relay_url.clone(),
        config.relay_shared_secret.clone(),
        vote_tx,
    );
    home_client.start();
    let home_client = Arc::new(home_client);

    tokio::spawn(async move {
        // The tick processor already tallies votes straight off the shared
        // KV store, so `vote_batch` is not acted on here; it is still read
        // off the channel so a lagging relay connection can't back it up.
        while let Some(message) = vote_rx.recv().await {
            tracing::debug!(?message, "message from relay queued for processing");
        }
    });

    let service = Arc::new(
        GameStateService::new("game-1", Arc::new(tokio::sync::Mutex::new(processor)))
            .with_home_client(home_client),
    );

    let mut supervisor = build_supervisor(service.clone(), emulator, &config);
    supervisor.start();

    tracing::info!("back end running");
    std::future::pending::<()>().await;
}

/// Separated out so the watchdog is always built from the same processor
/// handle `GameStateService` reads from, rather than a second independent
/// one that would silently drift out of sync.
fn build_supervisor(
    service: Arc<GameStateService<MockEmulator>>,
    emulator: Arc<MockEmulator>,
    config: &Config,
) -> PhaseSupervisor<MockEmulator> {
    let processor = service.processor();
    PhaseSupervisor::from_shared(processor, emulator, service).with_tick_interval(config.tick_interval)
}
