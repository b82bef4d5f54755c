use bitflags::bitflags;

use super::{Participant, ParticipantId};

bitflags! {
    /// Names which fields of a [`StateUpdate`] a mutation touched.
    ///
    /// Each bit covers one field of the snapshot. Sinks must treat fields
    /// whose flag is absent as unchanged and ignore the carried value.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UpdateFields: u8 {
        const ORDER   = 1 << 0;
        const CURRENT = 1 << 1;
        const RUNNING = 1 << 2;
    }
}

/// Immutable snapshot of the fields a mutation touched.
///
/// Every engine operation returns one of these; presentation layers receive
/// a subset of fields per operation and keep their previous value for
/// anything not flagged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateUpdate {
    pub fields: UpdateFields,

    /// Full roster sorted by initiative descending. Meaningful when `ORDER`
    /// is set.
    pub order: Vec<Participant>,

    /// Pointer identity; `None` means no current turn. Meaningful when
    /// `CURRENT` is set.
    pub current: Option<ParticipantId>,

    /// Whether a turn cycle is in progress. Meaningful when `RUNNING` is set.
    pub running: bool,
}

impl StateUpdate {
    /// Folds a later snapshot into this one: the field masks union, and for
    /// fields both carry, the later value wins.
    ///
    /// Lets a multi-step operation notify its sink exactly once.
    pub fn merge(mut self, later: StateUpdate) -> StateUpdate {
        if later.has_current() {
            self.current = later.current;
        }
        if later.has_running() {
            self.running = later.running;
        }
        if later.has_order() {
            self.order = later.order;
        }
        self.fields |= later.fields;
        self
    }

    pub fn has_order(&self) -> bool {
        self.fields.contains(UpdateFields::ORDER)
    }

    pub fn has_current(&self) -> bool {
        self.fields.contains(UpdateFields::CURRENT)
    }

    pub fn has_running(&self) -> bool {
        self.fields.contains(UpdateFields::RUNNING)
    }
}
