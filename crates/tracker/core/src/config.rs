/// Engine configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterConfig {
    /// Number of faces on the die used for local initiative rolls.
    pub initiative_die: u32,
}

impl EncounterConfig {
    pub const DEFAULT_INITIATIVE_DIE: u32 = 20;

    pub fn new() -> Self {
        Self {
            initiative_die: Self::DEFAULT_INITIATIVE_DIE,
        }
    }

    pub fn with_initiative_die(initiative_die: u32) -> Self {
        Self { initiative_die }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self::new()
    }
}
