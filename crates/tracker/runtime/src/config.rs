//! Tracker configuration: initiative formula, party template, and condition
//! vocabulary.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracker_core::{Condition, EncounterConfig, PartyMember};

use crate::api::{Result, TrackerError};

/// Runtime configuration for a tracker session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Formula template handed to the external roller; every `%mod%` is
    /// replaced with the participant's modifier.
    #[serde(default = "default_initiative_formula")]
    pub initiative: String,

    /// Party template copied into every new encounter.
    #[serde(default)]
    pub party: Vec<PartyMember>,

    /// Status-tag vocabulary offered to the user. Opaque to the engine.
    #[serde(default = "default_conditions")]
    pub conditions: Vec<Condition>,

    /// Core engine tunables.
    #[serde(default)]
    pub engine: EncounterConfig,
}

impl TrackerConfig {
    pub const DEFAULT_INITIATIVE_FORMULA: &'static str = "1d20 + %mod%";

    pub fn new() -> Self {
        Self {
            initiative: default_initiative_formula(),
            party: Vec::new(),
            conditions: default_conditions(),
            engine: EncounterConfig::default(),
        }
    }

    /// Replaces the party template.
    pub fn with_party(mut self, party: Vec<PartyMember>) -> Self {
        self.party = party;
        self
    }

    /// Load configuration from a RON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::InvalidConfig(format!("failed to read tracker config: {e}"))
        })?;

        let config = ron::from_str(&content).map_err(|e| {
            TrackerError::InvalidConfig(format!("failed to parse tracker config RON: {e}"))
        })?;

        Ok(config)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_initiative_formula() -> String {
    TrackerConfig::DEFAULT_INITIATIVE_FORMULA.to_string()
}

/// The stock 5e condition list; replaceable wholesale from config.
fn default_conditions() -> Vec<Condition> {
    [
        "Blinded",
        "Charmed",
        "Deafened",
        "Frightened",
        "Grappled",
        "Incapacitated",
        "Invisible",
        "Paralyzed",
        "Petrified",
        "Poisoned",
        "Prone",
        "Restrained",
        "Stunned",
        "Unconscious",
    ]
    .into_iter()
    .map(Condition::new)
    .collect()
}
