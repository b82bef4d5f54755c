//! Authoritative encounter state representation.
//!
//! This module owns the roster, turn bookkeeping, and the derived views over
//! them. Runtime layers clone or query this state but mutate it exclusively
//! through the engine. The ordered view and the active set are recomputed on
//! every read; only the roster and the turn bookkeeping are stored, so the
//! views can never drift out of sync.
mod participant;
mod turn;
mod update;

pub use participant::{Condition, ConditionSet, Participant, ParticipantId, PartyMember};
pub use turn::TurnState;
pub use update::{StateUpdate, UpdateFields};

/// Canonical encounter state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterState {
    /// RNG seed for deterministic local initiative rolls.
    ///
    /// Set once at construction and never modified. Combined with `nonce`
    /// to derive a unique seed for each roll.
    pub seed: u64,

    /// Sequential participant id allocator (monotonically increasing).
    ///
    /// Never reused, even across encounter replacement.
    next_participant_id: u32,

    /// Mutation counter mixed into roll seeds.
    pub nonce: u64,

    /// Roster in insertion order (before any sorting).
    pub roster: Vec<Participant>,

    /// Pointer and running flag.
    pub turn: TurnState,
}

impl EncounterState {
    /// Creates an empty state with the default seed.
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Creates an empty state with a specific roll seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            next_participant_id: 0,
            nonce: 0,
            roster: Vec::new(),
            turn: TurnState::default(),
        }
    }

    /// Allocates a participant id that has never been used before.
    pub fn allocate_participant_id(&mut self) -> ParticipantId {
        let id = ParticipantId(self.next_participant_id);
        self.next_participant_id = self
            .next_participant_id
            .checked_add(1)
            .expect("ParticipantId overflow");
        id
    }

    /// Looks up a participant by identity.
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Looks up a participant by identity for mutation.
    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.roster.iter_mut().find(|p| p.id == id)
    }

    /// Roster sorted by initiative descending.
    ///
    /// The sort is stable, so ties keep their relative roster (insertion)
    /// order.
    pub fn ordered(&self) -> Vec<&Participant> {
        let mut view: Vec<&Participant> = self.roster.iter().collect();
        view.sort_by(|a, b| b.initiative.cmp(&a.initiative));
        view
    }

    /// Positions in the ordered view whose participant is enabled.
    pub fn active_indices(&self) -> Vec<usize> {
        self.ordered()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.enabled)
            .map(|(index, _)| index)
            .collect()
    }

    /// Identities of the enabled participants, in ordered-view order.
    pub fn active_ids(&self) -> Vec<ParticipantId> {
        self.ordered()
            .into_iter()
            .filter(|p| p.enabled)
            .map(|p| p.id)
            .collect()
    }

    /// Ordered-view position of the current pointer, if any.
    pub fn current_position(&self) -> Option<usize> {
        let current = self.turn.current?;
        self.ordered().iter().position(|p| p.id == current)
    }

    /// Owned snapshot of the ordered view, for notification payloads.
    pub fn ordered_snapshot(&self) -> Vec<Participant> {
        self.ordered().into_iter().cloned().collect()
    }
}

impl Default for EncounterState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entrant(state: &mut EncounterState, name: &str, initiative: i32) -> ParticipantId {
        let id = state.allocate_participant_id();
        let mut participant = PartyMember::new(name, 10, 12, 0).to_participant(id);
        participant.initiative = initiative;
        state.roster.push(participant);
        id
    }

    #[test]
    fn ordered_view_sorts_by_initiative_descending() {
        let mut state = EncounterState::new();
        entrant(&mut state, "slow", 3);
        entrant(&mut state, "fast", 19);
        entrant(&mut state, "middle", 11);

        let names: Vec<&str> = state.ordered().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["fast", "middle", "slow"]);
    }

    #[test]
    fn ordered_view_keeps_insertion_order_on_ties() {
        let mut state = EncounterState::new();
        let first = entrant(&mut state, "first", 10);
        let second = entrant(&mut state, "second", 10);
        let third = entrant(&mut state, "third", 10);

        let ids: Vec<ParticipantId> = state.ordered().iter().map(|p| p.id).collect();
        assert_eq!(ids, [first, second, third]);
    }

    #[test]
    fn active_indices_skip_disabled_participants() {
        let mut state = EncounterState::new();
        entrant(&mut state, "a", 20);
        let b = entrant(&mut state, "b", 15);
        entrant(&mut state, "c", 10);

        state.participant_mut(b).unwrap().enabled = false;

        assert_eq!(state.active_indices(), [0, 2]);
    }

    #[test]
    fn participant_ids_are_never_reused() {
        let mut state = EncounterState::new();
        let first = entrant(&mut state, "gone", 1);
        state.roster.clear();
        let second = entrant(&mut state, "fresh", 1);

        assert_ne!(first, second);
    }

    #[test]
    fn current_position_tracks_identity_across_initiative_edits() {
        let mut state = EncounterState::new();
        let a = entrant(&mut state, "a", 20);
        entrant(&mut state, "b", 15);

        state.turn.current = Some(a);
        assert_eq!(state.current_position(), Some(0));

        // Dropping a's initiative moves its position, not its identity.
        state.participant_mut(a).unwrap().initiative = 1;
        assert_eq!(state.current_position(), Some(1));
    }
}
