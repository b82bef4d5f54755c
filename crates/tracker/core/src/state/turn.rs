use super::ParticipantId;

/// Turn bookkeeping for the encounter cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Whose turn it is. `None` whenever nothing is active.
    ///
    /// Stored as a stable identity rather than an ordered-view position so
    /// initiative edits cannot silently retarget the pointer.
    pub current: Option<ParticipantId>,

    /// Whether a turn cycle is in progress.
    pub running: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
