//! Mutation operations for the encounter state.
//!
//! [`EncounterEngine`] is the authoritative reducer for [`EncounterState`].
//! Every operation recomputes the ordered and active views from live state,
//! keeps the pointer consistent with them, and returns a [`StateUpdate`]
//! snapshot naming exactly the fields it touched so presentation layers can
//! re-render without reaching into shared state.

mod errors;
mod turns;

pub use errors::EncounterError;
pub use turns::Direction;

use crate::config::EncounterConfig;
use crate::dice::{DiceOracle, compute_seed};
use crate::state::{
    Condition, EncounterState, ParticipantId, PartyMember, StateUpdate, TurnState, UpdateFields,
};

/// Tagged field updates for [`EncounterEngine::update_participant`].
///
/// `AdjustHp` is a delta on purpose: damage and healing arrive as relative
/// amounts. The other variants replace their field outright.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParticipantUpdate {
    /// Replace the display name. Empty names are ignored.
    SetName(String),
    /// Add a delta to current hp. Never clamped in either direction.
    AdjustHp(i32),
    /// Replace armor class.
    SetAc(i32),
    /// Replace initiative. Never triggers a re-roll.
    SetInitiative(i32),
}

/// Encounter engine that applies mutations and keeps pointer and ordering
/// consistent.
pub struct EncounterEngine<'a> {
    state: &'a mut EncounterState,
    config: &'a EncounterConfig,
}

impl<'a> EncounterEngine<'a> {
    /// Creates a new engine over the given state.
    pub fn new(state: &'a mut EncounterState, config: &'a EncounterConfig) -> Self {
        Self { state, config }
    }

    /// Builds the snapshot for the given field mask from live state.
    fn update(&self, fields: UpdateFields) -> StateUpdate {
        StateUpdate {
            fields,
            order: if fields.contains(UpdateFields::ORDER) {
                self.state.ordered_snapshot()
            } else {
                Vec::new()
            },
            current: self.state.turn.current,
            running: self.state.turn.running,
        }
    }

    /// Appends fresh participants stamped from the given base records.
    ///
    /// No initiative is assigned; a resolution pass does that separately.
    /// The same record added twice produces two distinct entries.
    pub fn add_participants(&mut self, members: &[PartyMember]) -> StateUpdate {
        self.state.nonce += 1;
        for member in members {
            let id = self.state.allocate_participant_id();
            self.state.roster.push(member.to_participant(id));
        }
        self.update(UpdateFields::ORDER)
    }

    /// Removes every roster entry matching any of the given identities.
    ///
    /// A removed participant holding the pointer hands it off first, exactly
    /// as if it had been disabled; if nothing remains active the pointer
    /// becomes `None`. Unknown identities are skipped.
    pub fn remove_participants(&mut self, ids: &[ParticipantId]) -> StateUpdate {
        self.state.nonce += 1;
        for &id in ids {
            self.disable(id);
        }
        self.state.roster.retain(|p| !ids.contains(&p.id));
        self.update(UpdateFields::ORDER | UpdateFields::CURRENT)
    }

    /// Replaces the roster with fresh copies of the party template and
    /// resets the turn bookkeeping to defaults.
    ///
    /// Initiative resolution follows under the caller's control; see
    /// [`EncounterEngine::apply_initiatives`].
    pub fn start_new_encounter(&mut self, party: &[PartyMember]) -> StateUpdate {
        self.state.nonce += 1;
        self.state.roster.clear();
        self.state.turn = TurnState::default();
        for member in party {
            let id = self.state.allocate_participant_id();
            self.state.roster.push(member.to_participant(id));
        }
        self.update(UpdateFields::ORDER | UpdateFields::CURRENT | UpdateFields::RUNNING)
    }

    /// Restores every participant to full hp, clears conditions, re-enables
    /// everyone, and points at the first position of the active view.
    ///
    /// Initiative values are untouched; this is a same-order rematch.
    pub fn reset_encounter(&mut self) -> StateUpdate {
        self.state.nonce += 1;
        for participant in &mut self.state.roster {
            participant.hp = participant.max_hp;
            participant.conditions.clear();
            participant.enabled = true;
        }
        self.state.turn.current = self.first_active();
        self.update(UpdateFields::ORDER | UpdateFields::CURRENT)
    }

    /// Applies tagged field updates to one participant.
    pub fn update_participant(
        &mut self,
        id: ParticipantId,
        updates: &[ParticipantUpdate],
    ) -> Result<StateUpdate, EncounterError> {
        let Some(participant) = self.state.participant_mut(id) else {
            return Err(EncounterError::UnknownParticipant(id));
        };
        for update in updates {
            match update {
                ParticipantUpdate::SetName(name) => {
                    if !name.is_empty() {
                        participant.name = name.clone();
                    }
                }
                ParticipantUpdate::AdjustHp(delta) => participant.hp += delta,
                ParticipantUpdate::SetAc(ac) => participant.ac = *ac,
                ParticipantUpdate::SetInitiative(initiative) => {
                    participant.initiative = *initiative
                }
            }
        }
        self.state.nonce += 1;
        Ok(self.update(UpdateFields::ORDER))
    }

    /// Enables or disables a participant, keeping the pointer on an eligible
    /// entry.
    ///
    /// Enabling the only active participant makes it the current turn.
    /// Disabling the pointer-holder first advances the pointer forward so the
    /// handoff lands on a participant that stays eligible; if nothing remains
    /// active afterwards the pointer becomes `None`.
    pub fn set_enabled(
        &mut self,
        id: ParticipantId,
        enabled: bool,
    ) -> Result<StateUpdate, EncounterError> {
        if self.state.participant(id).is_none() {
            return Err(EncounterError::UnknownParticipant(id));
        }
        self.state.nonce += 1;
        if enabled {
            self.enable(id);
        } else {
            self.disable(id);
        }
        Ok(self.update(UpdateFields::ORDER | UpdateFields::CURRENT))
    }

    fn enable(&mut self, id: ParticipantId) {
        if let Some(participant) = self.state.participant_mut(id) {
            participant.enabled = true;
        }
        // A roster that just went from fully disabled to one active entry
        // has an unambiguous current turn.
        let active = self.state.active_ids();
        if active.len() == 1 {
            self.state.turn.current = Some(active[0]);
        }
    }

    fn disable(&mut self, id: ParticipantId) {
        if self.state.participant(id).is_none() {
            return;
        }
        if self.state.turn.current == Some(id) {
            // Hand off while the participant still counts as active so the
            // step lands on the next eligible entry.
            self.state.turn.current = self.next_active(Direction::Next);
        }
        if let Some(participant) = self.state.participant_mut(id) {
            participant.enabled = false;
        }
        if self.state.active_ids().is_empty() {
            self.state.turn.current = None;
        }
    }

    /// Flips the running flag.
    ///
    /// Entering the running state initializes a missing pointer to the first
    /// active participant; leaving it preserves the pointer so pausing and
    /// resuming keeps position.
    pub fn toggle_running(&mut self) -> StateUpdate {
        self.state.nonce += 1;
        self.state.turn.running = !self.state.turn.running;
        if self.state.turn.running && self.state.turn.current.is_none() {
            self.state.turn.current = self.first_active();
        }
        self.update(UpdateFields::CURRENT | UpdateFields::RUNNING)
    }

    /// Inserts a condition tag; adding an existing tag is a no-op.
    pub fn add_status(
        &mut self,
        id: ParticipantId,
        tag: Condition,
    ) -> Result<StateUpdate, EncounterError> {
        let Some(participant) = self.state.participant_mut(id) else {
            return Err(EncounterError::UnknownParticipant(id));
        };
        participant.conditions.insert(tag);
        self.state.nonce += 1;
        Ok(self.update(UpdateFields::ORDER))
    }

    /// Removes a condition tag; removing an absent tag is a no-op.
    pub fn remove_status(
        &mut self,
        id: ParticipantId,
        tag: &Condition,
    ) -> Result<StateUpdate, EncounterError> {
        let Some(participant) = self.state.participant_mut(id) else {
            return Err(EncounterError::UnknownParticipant(id));
        };
        participant.conditions.remove(tag);
        self.state.nonce += 1;
        Ok(self.update(UpdateFields::ORDER))
    }

    /// Deterministic local initiative roll for one participant: a single die
    /// (sides from config) plus the participant's modifier.
    ///
    /// Does not mutate; callers collect rolls and land them in one batch via
    /// [`EncounterEngine::apply_initiatives`].
    pub fn local_initiative(
        &self,
        id: ParticipantId,
        dice: &dyn DiceOracle,
    ) -> Result<i32, EncounterError> {
        let participant = self
            .state
            .participant(id)
            .ok_or(EncounterError::UnknownParticipant(id))?;
        let seed = compute_seed(self.state.seed, self.state.nonce, id.0);
        let roll = dice.roll_die(seed, self.config.initiative_die) as i32;
        Ok(roll + participant.modifier)
    }

    /// Assigns a batch of resolved initiative values in one mutation.
    ///
    /// Unknown identities are skipped so a roll that outlived its participant
    /// cannot corrupt anything.
    pub fn apply_initiatives(&mut self, rolls: &[(ParticipantId, i32)]) -> StateUpdate {
        for &(id, initiative) in rolls {
            if let Some(participant) = self.state.participant_mut(id) {
                participant.initiative = initiative;
            }
        }
        self.state.nonce += 1;
        self.update(UpdateFields::ORDER)
    }
}
