//! Phase watchdog (spec §4.7.1): polls the emulator's RAM for the current
//! phase at a fixed interval and makes sure exactly one tick loop is running
//! for it, swapping the running task out when the phase changes. This keeps
//! battle and overworld ticking independent without a global lock: only the
//! watchdog ever decides which loop is live.

use std::sync::Arc;
use std::time::Duration;

use protocol::Phase;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::emulator::Emulator;
use crate::tick_processor::{TickProcessor, DEFAULT_TICK_INTERVAL_MS};

/// Default poll interval for phase detection (spec §4.7.1: "500 ms").
pub const DEFAULT_WATCHDOG_INTERVAL_MS: u64 = 500;

/// What the watchdog hands each tick outcome to, so callers can persist and
/// broadcast without the supervisor knowing about the store or the relay.
#[async_trait::async_trait]
pub trait TickSink: Send + Sync {
    async fn on_tick(&self, outcome: crate::tick_processor::TickOutcome);
}

/// Owns the single [`TickProcessor`] for a game and the watchdog task that
/// keeps it ticking in step with the detected phase. There is only one
/// processor type today (battle and overworld share a pipeline), so "start
/// the appropriate sub-processor" reduces to "keep the shared loop's
/// interval matched to the phase"; the watchdog still re-detects the phase
/// every poll so a future battle-specific cadence slots in without
/// touching the tick processor itself.
pub struct PhaseSupervisor<E: Emulator + 'static> {
    emulator: Arc<E>,
    processor: Arc<Mutex<TickProcessor<E>>>,
    sink: Arc<dyn TickSink>,
    watchdog_interval: Duration,
    tick_interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl<E: Emulator + 'static> PhaseSupervisor<E> {
    pub fn new(processor: TickProcessor<E>, emulator: Arc<E>, sink: Arc<dyn TickSink>) -> Self {
        Self::from_shared(Arc::new(Mutex::new(processor)), emulator, sink)
    }

    /// Builds a watchdog around a processor handle some other component
    /// (e.g. [`crate::game_state_service::GameStateService`]) already holds,
    /// so both read the same pending tick rather than two independent ones.
    pub fn from_shared(
        processor: Arc<Mutex<TickProcessor<E>>>,
        emulator: Arc<E>,
        sink: Arc<dyn TickSink>,
    ) -> Self {
        Self {
            emulator,
            processor,
            sink,
            watchdog_interval: Duration::from_millis(DEFAULT_WATCHDOG_INTERVAL_MS),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            handle: None,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Starts the watchdog loop. Idempotent: calling it again while already
    /// running is a no-op.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        let emulator = self.emulator.clone();
        let processor = self.processor.clone();
        let sink = self.sink.clone();
        let watchdog_interval = self.watchdog_interval;
        let tick_interval = self.tick_interval;

        self.handle = Some(tokio::spawn(async move {
            let mut poll = tokio::time::interval(watchdog_interval);
            let mut last_phase: Option<Phase> = None;
            let mut since_last_tick = Duration::ZERO;

            loop {
                poll.tick().await;
                let ram = emulator.read_ram().await;
                let phase = decoder::detect_phase(&ram);

                if last_phase != Some(phase) {
                    info!(?phase, "phase transition detected, watchdog following");
                    last_phase = Some(phase);
                }

                since_last_tick += watchdog_interval;
                if since_last_tick < tick_interval {
                    continue;
                }
                since_last_tick = Duration::ZERO;

                let mut guard = processor.lock().await;
                match guard.run_tick().await {
                    Ok(outcome) => {
                        debug!(tick = outcome.tick, action = ?outcome.action, "tick complete");
                        drop(guard);
                        sink.on_tick(outcome).await;
                    }
                    Err(error) => {
                        warn!(%error, "tick failed, retrying next interval");
                    }
                }
            }
        }));
    }

    /// Stops the watchdog task. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn processor(&self) -> Arc<Mutex<TickProcessor<E>>> {
        self.processor.clone()
    }
}

impl<E: Emulator + 'static> Drop for PhaseSupervisor<E> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::mock::MockEmulator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use store::{FakeStore, Scoreboard, VoteAggregator};

    struct CountingSink(AtomicUsize);

    #[async_trait::async_trait]
    impl TickSink for CountingSink {
        async fn on_tick(&self, _outcome: crate::tick_processor::TickOutcome) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn watchdog_ticks_once_per_tick_interval() {
        let kv = Arc::new(FakeStore::new());
        let emulator = Arc::new(MockEmulator::new());
        let processor = TickProcessor::new(
            "game-1",
            emulator.clone(),
            Arc::new(VoteAggregator::new(kv)),
            Arc::new(Scoreboard::new()),
        );
        let sink = Arc::new(CountingSink(AtomicUsize::new(0)));

        let mut supervisor = PhaseSupervisor::new(processor, emulator, sink.clone())
            .with_tick_interval(Duration::from_millis(DEFAULT_WATCHDOG_INTERVAL_MS * 2));
        supervisor.start();

        tokio::time::advance(Duration::from_millis(DEFAULT_WATCHDOG_INTERVAL_MS * 2 + 50)).await;
        tokio::task::yield_now().await;

        assert_eq!(sink.0.load(Ordering::SeqCst), 1);
        supervisor.stop();
    }
}
