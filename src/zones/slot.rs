//! Slots: single card positions.
//!
//! A slot may link to a `next` slot, forming the lane-progression chain
//! (deployment -> advance positions -> combat). The link is fixed when
//! the board wires its lane.

use crate::core::{CardHandle, SlotId, ZoneId};

/// A single card position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub(crate) id: SlotId,
    pub(crate) zone: ZoneId,
    pub(crate) index: usize,
    pub(crate) occupant: Option<CardHandle>,
    pub(crate) next: Option<SlotId>,
}

impl Slot {
    pub(crate) fn new(id: SlotId, zone: ZoneId, index: usize) -> Self {
        Self {
            id,
            zone,
            index,
            occupant: None,
            next: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// Zone this slot belongs to.
    #[must_use]
    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    /// Position within the zone.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn occupant(&self) -> Option<CardHandle> {
        self.occupant
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    /// Next slot in the lane chain, if any.
    #[must_use]
    pub fn next(&self) -> Option<SlotId> {
        self.next
    }
}
