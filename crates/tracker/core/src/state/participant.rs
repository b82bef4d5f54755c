use std::collections::HashSet;
use std::fmt;

/// Unique identifier for a roster entry.
///
/// Identity is allocated when the participant enters the roster and is never
/// reused. Positions in the ordered view are sort-dependent and must never be
/// treated as identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque status-tag identifier.
///
/// The vocabulary is supplied by the embedding application; the engine never
/// interprets tags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Condition(String);

impl Condition {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Condition {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Active condition tags on a participant.
///
/// Insertion order is irrelevant; inserting a tag that is already present is
/// a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionSet {
    tags: HashSet<Condition>,
}

impl ConditionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tag. Returns false if it was already present.
    pub fn insert(&mut self, tag: Condition) -> bool {
        self.tags.insert(tag)
    }

    /// Removes a tag. Returns false if it was not present.
    pub fn remove(&mut self, tag: &Condition) -> bool {
        self.tags.remove(tag)
    }

    pub fn contains(&self, tag: &Condition) -> bool {
        self.tags.contains(tag)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.tags.iter()
    }
}

/// Base record for one party template entry.
///
/// Consumed by `start_new_encounter`; carries everything needed to stamp a
/// fresh participant except identity and initiative.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    pub name: String,
    pub max_hp: i32,
    pub ac: i32,
    /// Bonus added to initiative rolls.
    pub modifier: i32,
}

impl PartyMember {
    pub fn new(name: impl Into<String>, max_hp: i32, ac: i32, modifier: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            ac,
            modifier,
        }
    }

    /// Stamps a fresh enabled participant at full hp.
    ///
    /// Initiative starts at zero until a resolution pass assigns it.
    pub fn to_participant(&self, id: ParticipantId) -> Participant {
        Participant {
            id,
            name: self.name.clone(),
            hp: self.max_hp,
            max_hp: self.max_hp,
            ac: self.ac,
            initiative: 0,
            modifier: self.modifier,
            enabled: true,
            conditions: ConditionSet::new(),
        }
    }
}

/// A combat entrant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,

    /// Current hit points. May exceed `max_hp` (healing overage) and may go
    /// negative; the engine never clamps.
    pub hp: i32,
    pub max_hp: i32,
    pub ac: i32,

    /// Ordering key for the ordered view (descending).
    pub initiative: i32,
    /// Bonus added to initiative rolls.
    pub modifier: i32,

    /// Participates in turn cycling when true.
    pub enabled: bool,
    pub conditions: ConditionSet,
}
