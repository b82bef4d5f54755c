//! Deterministic turn-order engine for tabletop encounter tracking.
//!
//! `tracker-core` defines the canonical encounter state (roster, ordered
//! view, pointer) and the mutation operations over it, and exposes pure APIs
//! that the runtime and offline tools can both reuse. All state mutation
//! flows through [`engine::EncounterEngine`], which returns immutable
//! [`StateUpdate`] snapshots instead of pushing into shared references.
pub mod config;
pub mod dice;
pub mod engine;
pub mod state;

pub use config::EncounterConfig;
pub use dice::{DiceOracle, PcgDice, compute_seed};
pub use engine::{Direction, EncounterEngine, EncounterError, ParticipantUpdate};
pub use state::{
    Condition, ConditionSet, EncounterState, Participant, ParticipantId, PartyMember, StateUpdate,
    TurnState, UpdateFields,
};
