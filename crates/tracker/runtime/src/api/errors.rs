//! Unified error types surfaced by the tracker runtime.
//!
//! Wraps failures from the core engine and configuration loading so clients
//! can bubble them up with consistent context.
use thiserror::Error;

pub use tracker_core::EncounterError;

pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Encounter(#[from] EncounterError),

    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),
}
