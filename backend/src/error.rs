use thiserror::Error;

/// Failures the tick pipeline and home client can hit. Per spec §7, none of
/// these tear the pipeline down: the offending tick (or reconnect attempt)
/// is logged and retried on the next interval.
#[derive(Debug, Error)]
pub enum TickError {
    #[error("emulator error: {0}")]
    Emulator(String),
    #[error("store error: {0}")]
    Store(#[from] store::StoreError),
}
