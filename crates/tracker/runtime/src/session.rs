//! Single-writer session that owns the encounter and serializes mutations.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracker_core::{
    Condition, Direction, EncounterEngine, EncounterState, ParticipantId, ParticipantUpdate,
    PartyMember, PcgDice, StateUpdate,
};

use crate::api::Result;
use crate::config::TrackerConfig;
use crate::events::EventBus;
use crate::roller::{InitiativeRoller, substitute_modifier};

/// Owns the encounter state and publishes one [`StateUpdate`] per operation.
///
/// Every mutation takes `&mut self`, so the single-mutator assumption is
/// enforced by the borrow checker rather than by locks. That also covers the
/// only suspension point, initiative resolution: turn cycling cannot
/// interleave with an in-flight roll, and a resolution pass that is dropped
/// mid-await applies nothing because rolls land in one batch at the end.
pub struct TrackerSession {
    state: EncounterState,
    config: TrackerConfig,
    dice: PcgDice,
    roller: Option<Arc<dyn InitiativeRoller>>,
    bus: EventBus,
}

impl TrackerSession {
    /// Creates a session with a random roll seed.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// Creates a session with a fixed roll seed, for replayable encounters.
    pub fn with_seed(config: TrackerConfig, seed: u64) -> Self {
        Self {
            state: EncounterState::with_seed(seed),
            config,
            dice: PcgDice,
            roller: None,
            bus: EventBus::new(),
        }
    }

    /// Attaches an external initiative roller.
    pub fn with_roller(mut self, roller: Arc<dyn InitiativeRoller>) -> Self {
        self.roller = Some(roller);
        self
    }

    /// Registers a presentation-layer subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<StateUpdate> {
        self.bus.subscribe()
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn engine(&mut self) -> EncounterEngine<'_> {
        EncounterEngine::new(&mut self.state, &self.config.engine)
    }

    fn publish(&self, update: StateUpdate) {
        self.bus.publish(update);
    }

    /// Appends participants stamped from the given base records and returns
    /// their identities.
    pub fn add_participants(&mut self, members: &[PartyMember]) -> Vec<ParticipantId> {
        let first_new = self.state.roster.len();
        let update = self.engine().add_participants(members);
        let ids = self.state.roster[first_new..]
            .iter()
            .map(|p| p.id)
            .collect();
        tracing::debug!(count = members.len(), "added participants");
        self.publish(update);
        ids
    }

    /// Removes every roster entry matching any of the given identities.
    pub fn remove_participants(&mut self, ids: &[ParticipantId]) {
        let update = self.engine().remove_participants(ids);
        tracing::debug!(count = ids.len(), "removed participants");
        self.publish(update);
    }

    /// Replaces the roster with fresh copies of the configured party and
    /// resolves initiative for every participant.
    ///
    /// One notification for the whole operation, published after the rolls
    /// have landed.
    pub async fn start_new_encounter(&mut self) {
        let party = self.config.party.clone();
        let replaced = self.engine().start_new_encounter(&party);
        tracing::info!(participants = party.len(), "started new encounter");
        let rolled = self.resolve_initiatives().await;
        self.publish(replaced.merge(rolled));
    }

    /// Re-rolls initiative for the current roster without replacing it.
    pub async fn reroll_initiatives(&mut self) {
        let update = self.resolve_initiatives().await;
        tracing::info!("re-rolled initiatives");
        self.publish(update);
    }

    /// Restores hp and conditions, re-enables everyone, and points at the
    /// top of the order. Initiative is kept.
    pub fn reset_encounter(&mut self) {
        let update = self.engine().reset_encounter();
        tracing::info!("reset encounter");
        self.publish(update);
    }

    /// Applies tagged field updates to one participant.
    pub fn update_participant(
        &mut self,
        id: ParticipantId,
        updates: &[ParticipantUpdate],
    ) -> Result<()> {
        let update = self.engine().update_participant(id, updates)?;
        tracing::debug!(participant = %id, count = updates.len(), "updated participant");
        self.publish(update);
        Ok(())
    }

    /// Enables or disables a participant, handing the pointer off if needed.
    pub fn set_enabled(&mut self, id: ParticipantId, enabled: bool) -> Result<()> {
        let update = self.engine().set_enabled(id, enabled)?;
        tracing::debug!(participant = %id, enabled, "toggled participant");
        self.publish(update);
        Ok(())
    }

    /// Moves the turn pointer one step through the active set.
    pub fn advance(&mut self, direction: Direction) {
        let update = self.engine().advance(direction);
        tracing::debug!(%direction, current = ?update.current, "advanced turn");
        self.publish(update);
    }

    /// Starts or pauses the turn cycle.
    pub fn toggle_running(&mut self) {
        let update = self.engine().toggle_running();
        tracing::info!(running = update.running, "toggled encounter");
        self.publish(update);
    }

    /// Adds a condition tag to a participant.
    pub fn add_status(&mut self, id: ParticipantId, tag: Condition) -> Result<()> {
        let update = self.engine().add_status(id, tag)?;
        tracing::debug!(participant = %id, "added status");
        self.publish(update);
        Ok(())
    }

    /// Removes a condition tag from a participant.
    pub fn remove_status(&mut self, id: ParticipantId, tag: &Condition) -> Result<()> {
        let update = self.engine().remove_status(id, tag)?;
        tracing::debug!(participant = %id, "removed status");
        self.publish(update);
        Ok(())
    }

    /// Resolves initiative for every roster participant and lands the whole
    /// batch as one mutation. Does not publish; callers fold the returned
    /// snapshot into their own notification.
    async fn resolve_initiatives(&mut self) -> StateUpdate {
        let pending: Vec<(ParticipantId, i32)> = self
            .state
            .roster
            .iter()
            .map(|p| (p.id, p.modifier))
            .collect();

        let mut rolls = Vec::with_capacity(pending.len());
        for (id, modifier) in pending {
            rolls.push((id, self.resolve_one(id, modifier).await));
        }

        self.engine().apply_initiatives(&rolls)
    }

    /// One participant's roll: external roller when attached, local die on
    /// absence or any failure. Never leaves initiative unresolved.
    async fn resolve_one(&mut self, id: ParticipantId, modifier: i32) -> i32 {
        if let Some(roller) = self.roller.clone() {
            let formula = substitute_modifier(&self.config.initiative, modifier);
            match roller.roll(&formula).await {
                Ok(value) => return value,
                Err(error) => {
                    tracing::warn!(%error, participant = %id, "external roll failed, using local die");
                }
            }
        }
        self.local_roll(id)
    }

    fn local_roll(&mut self, id: ParticipantId) -> i32 {
        let dice = self.dice;
        match self.engine().local_initiative(id, &dice) {
            Ok(value) => value,
            // Unreachable while the id comes from the live roster; fall back
            // to the bottom of the die rather than panic.
            Err(error) => {
                tracing::warn!(%error, "local roll failed");
                1
            }
        }
    }
}
