use crate::state::{ParticipantId, StateUpdate, UpdateFields};

use super::EncounterEngine;

/// Cycling direction for [`EncounterEngine::advance`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

/// Turn cycling methods for EncounterEngine.
impl<'a> EncounterEngine<'a> {
    /// Moves the pointer one step through the active set, wrapping at either
    /// end and skipping disabled participants transparently.
    ///
    /// An empty active set clears the pointer instead of cycling. A pointer
    /// referencing a participant that is no longer active is treated as
    /// sitting just outside the cycle: stepping forward lands on the first
    /// active participant, stepping backward on the last.
    pub fn advance(&mut self, direction: Direction) -> StateUpdate {
        self.state.nonce += 1;
        self.state.turn.current = self.next_active(direction);
        self.update(UpdateFields::CURRENT | UpdateFields::RUNNING)
    }

    /// Computes the identity the pointer would move to, without mutating it.
    ///
    /// Recomputed from the live ordered view on every call, never cached
    /// across mutations.
    pub(super) fn next_active(&self, direction: Direction) -> Option<ParticipantId> {
        let active = self.state.active_ids();
        if active.is_empty() {
            return None;
        }

        let len = active.len() as isize;
        let position = self
            .state
            .turn
            .current
            .and_then(|current| active.iter().position(|&id| id == current));
        let position = match position {
            Some(position) => position as isize,
            None => match direction {
                Direction::Next => -1,
                Direction::Previous => 0,
            },
        };

        let next = (position + direction.step()).rem_euclid(len) as usize;
        Some(active[next])
    }

    /// First active participant in ordered-view order, if any.
    pub(super) fn first_active(&self) -> Option<ParticipantId> {
        self.state.active_ids().first().copied()
    }
}
