//! Identifier newtypes.
//!
//! The board stores slots and card instances in flat arenas and refers to
//! them by index-like handles. This keeps the slot <-> card back-reference
//! a pair of plain values instead of mutual ownership.
//!
//! - `ZoneId`: index of a zone on the board
//! - `SlotId`: index of a slot in the board's slot arena
//! - `CardHandle`: runtime card instance, allocated by the board
//! - `CardId`: static card definition (lives in `cards`)

use serde::{Deserialize, Serialize};

/// Zone identifier, assigned by the board in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u16);

impl ZoneId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Zone({})", self.0)
    }
}

/// Slot identifier.
///
/// Slots are allocated once when the board is built and never move
/// between zones, so a `SlotId` stays valid for the whole game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl SlotId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// Handle to a runtime card instance.
///
/// Handles are never reused within a board, so a stale handle to a
/// destroyed card simply fails to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardHandle(pub u32);

impl CardHandle {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardHandle {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}
