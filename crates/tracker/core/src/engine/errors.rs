//! Error types surfaced by the encounter engine.

use crate::state::ParticipantId;

/// Errors returned by id-addressed engine operations.
///
/// Normal state transitions never error: an empty roster, disabling the last
/// active participant, or cycling with nothing active all degrade to "no
/// current turn". A stale participant reference is caller misuse and is
/// reported instead of silently ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
}
