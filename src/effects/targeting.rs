//! Target kinds and targeting modes.
//!
//! - `Target`: one thing a step can act on (a card, a slot, a side's player)
//! - `TargetType`: which kind of target a step wants
//! - `TargetingMode`: how the step picks among valid candidates
//! - `TargetCount`: how many it picks

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{CardHandle, Side, SlotId};

/// A resolved target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Target {
    Card(CardHandle),
    Slot(SlotId),
    Player(Side),
}

impl Target {
    #[must_use]
    pub fn as_card(&self) -> Option<CardHandle> {
        match self {
            Target::Card(handle) => Some(*handle),
            _ => None,
        }
    }
}

/// The kind of target a step wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    /// The step needs no targets.
    None,
    /// Any card on the board.
    Card,
    /// A card whose definition is a creature. Narrower than `Card`.
    Creature,
    Slot,
    Player,
}

impl TargetType {
    /// Whether `target` is of this kind and still exists.
    #[must_use]
    pub fn matches(self, target: &Target, board: &Board) -> bool {
        match (self, target) {
            (TargetType::Card, Target::Card(handle)) => board.card(*handle).is_some(),
            (TargetType::Creature, Target::Card(handle)) => {
                board.card(*handle).is_some_and(|card| card.is_creature())
            }
            (TargetType::Slot, Target::Slot(slot)) => board.slot(*slot).is_some(),
            (TargetType::Player, Target::Player(_)) => true,
            _ => false,
        }
    }

    /// Every target of this kind, in board order.
    #[must_use]
    pub fn candidates(self, board: &Board) -> Vec<Target> {
        match self {
            TargetType::None => Vec::new(),
            TargetType::Card | TargetType::Creature => board
                .cards_in_slot_order()
                .map(|card| Target::Card(card.handle))
                .filter(|target| self.matches(target, board))
                .collect(),
            TargetType::Slot => board.slots().iter().map(|s| Target::Slot(s.id())).collect(),
            TargetType::Player => Side::ALL.into_iter().map(Target::Player).collect(),
        }
    }
}

/// How a step chooses its targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingMode {
    /// Ask the installed selection handler.
    Manual,
    /// Every valid candidate. Finding none is not a failure.
    All,
    /// Up to `count` valid candidates, chosen with the battle RNG.
    Random,
    /// The owner's player, or the source card for card target types.
    Self_,
    /// Strictly the source card.
    Source,
    /// Targets an earlier step stored under this whiteboard key.
    FromWhiteboard(String),
}

/// Number of targets to select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetCount {
    Exactly(usize),
    All,
}

impl TargetCount {
    /// Cap on how many of `available` targets to take.
    #[must_use]
    pub fn limit(self, available: usize) -> usize {
        match self {
            TargetCount::Exactly(n) => n.min(available),
            TargetCount::All => available,
        }
    }
}
