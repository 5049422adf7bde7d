//! Zones: typed, side-owned containers of slots.

use serde::{Deserialize, Serialize};

use crate::core::{Side, SlotId, ZoneId};

/// What a zone is used for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Cards held by a side. Hand slots accept cards regardless of
    /// occupancy checks that apply to board zones.
    Hand,
    /// Where creatures enter the lane.
    Deployment,
    /// Intermediate lane positions.
    Advance,
    /// The far end of the lane; occupants here fight.
    Combat,
}

/// A zone on the board.
///
/// The slot list is fixed when the board is built. Slots never move
/// between zones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    pub(crate) id: ZoneId,
    pub(crate) kind: ZoneKind,
    pub(crate) side: Side,
    pub(crate) slots: Vec<SlotId>,
}

impl Zone {
    #[must_use]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ZoneKind {
        self.kind
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Slots in order.
    #[must_use]
    pub fn slots(&self) -> &[SlotId] {
        &self.slots
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slot at a position within the zone.
    #[must_use]
    pub fn slot_at(&self, index: usize) -> Option<SlotId> {
        self.slots.get(index).copied()
    }

    #[must_use]
    pub fn is_hand(&self) -> bool {
        self.kind == ZoneKind::Hand
    }
}
