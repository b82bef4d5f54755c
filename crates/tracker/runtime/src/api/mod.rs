//! Types downstream clients interact with.
mod errors;

pub use errors::{EncounterError, Result, TrackerError};
