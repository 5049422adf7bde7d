//! Per-side player state.

use crate::cards::Deck;
use crate::core::Side;

/// One side's health and deck.
///
/// Created once per battle and owned by it; combat and effects borrow it
/// rather than copying it.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub side: Side,
    pub health: i64,
    pub max_health: i64,
    pub deck: Deck,
}

impl PlayerState {
    /// Full health, empty deck.
    #[must_use]
    pub fn new(side: Side, health: i64) -> Self {
        Self {
            side,
            health,
            max_health: health,
            deck: Deck::new(),
        }
    }

    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.health < self.max_health
    }

    /// Returns the amount actually applied; non-positive amounts apply 0.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        if amount <= 0 {
            return 0;
        }
        self.health -= amount;
        amount
    }

    /// Symmetric to `take_damage`. Healing may exceed `max_health`.
    pub fn heal(&mut self, amount: i64) -> i64 {
        if amount <= 0 {
            return 0;
        }
        self.health += amount;
        amount
    }
}
