//! Card instances - runtime card state.
//!
//! `CardInstance` is a specific card in play. It starts from its
//! definition's base stats and diverges as buffs and damage land.
//! Its `slot` is the back-reference to the slot holding it; the board
//! keeps the two in sync.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardDefinition, CardType, Stat};
use crate::core::{CardHandle, Side, SlotId};

/// A card instance in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Handle assigned by the board.
    pub handle: CardHandle,

    /// Shared static definition.
    pub definition: Arc<CardDefinition>,

    /// Owning side.
    pub side: Side,

    pub power: i64,
    pub health: i64,
    pub speed: i64,

    /// Slot currently holding this card. Maintained by the board.
    pub slot: Option<SlotId>,
}

impl CardInstance {
    /// Create an instance at its definition's base stats.
    #[must_use]
    pub fn new(handle: CardHandle, definition: Arc<CardDefinition>, side: Side) -> Self {
        Self {
            handle,
            power: definition.power,
            health: definition.health,
            speed: definition.speed,
            definition,
            side,
            slot: None,
        }
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.definition.card_type
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.definition.is_creature()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn stat(&self, stat: Stat) -> i64 {
        match stat {
            Stat::Power => self.power,
            Stat::Health => self.health,
            Stat::Speed => self.speed,
        }
    }

    /// True once health has dropped below the definition's base value.
    #[must_use]
    pub fn is_damaged(&self) -> bool {
        self.health < self.definition.health
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Subtract damage from health. Returns the amount actually applied.
    pub fn take_damage(&mut self, amount: i64) -> i64 {
        if amount <= 0 {
            return 0;
        }
        self.health -= amount;
        amount
    }

    /// Add to health. Returns the amount actually applied.
    pub fn heal(&mut self, amount: i64) -> i64 {
        if amount <= 0 {
            return 0;
        }
        self.health += amount;
        amount
    }

    /// Apply a signed stat delta.
    ///
    /// Power and speed never drop below zero. A positive health delta
    /// leaves health at least 1; a negative one is not clamped, so a
    /// debuff can still reduce a card to zero or below.
    pub fn buff(&mut self, stat: Stat, delta: i64) {
        match stat {
            Stat::Power => self.power = (self.power + delta).max(0),
            Stat::Speed => self.speed = (self.speed + delta).max(0),
            Stat::Health => {
                self.health += delta;
                if delta > 0 {
                    self.health = self.health.max(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn instance(health: i64) -> CardInstance {
        let def = CardDefinition::new(CardId::new(1), "Squire", CardType::Creature)
            .with_stats(2, health, 1);
        CardInstance::new(CardHandle(10), Arc::new(def), Side::Player)
    }

    #[test]
    fn test_new_copies_base_stats() {
        let card = instance(3);
        assert_eq!((card.power, card.health, card.speed), (2, 3, 1));
        assert_eq!(card.slot, None);
        assert!(card.is_creature());
        assert!(!card.is_damaged());
    }

    #[test]
    fn test_damage_and_heal() {
        let mut card = instance(3);
        assert_eq!(card.take_damage(2), 2);
        assert_eq!(card.health, 1);
        assert!(card.is_damaged());

        assert_eq!(card.take_damage(0), 0);
        assert_eq!(card.take_damage(-4), 0);
        assert_eq!(card.health, 1);

        assert_eq!(card.heal(5), 5);
        assert_eq!(card.health, 6);
        assert_eq!(card.heal(-1), 0);
    }

    #[test]
    fn test_buff_power_and_speed_floor_at_zero() {
        let mut card = instance(3);
        card.buff(Stat::Power, -5);
        card.buff(Stat::Speed, -5);
        assert_eq!(card.power, 0);
        assert_eq!(card.speed, 0);

        card.buff(Stat::Power, 4);
        assert_eq!(card.power, 4);
    }

    #[test]
    fn test_positive_health_buff_floors_at_one() {
        let mut card = instance(3);
        card.take_damage(10);
        assert_eq!(card.health, -7);

        card.buff(Stat::Health, 2);
        assert_eq!(card.health, 1);
    }

    #[test]
    fn test_negative_health_buff_is_not_clamped() {
        let mut card = instance(3);
        card.buff(Stat::Health, -5);
        assert_eq!(card.health, -2);
        assert!(card.is_defeated());
    }
}
