//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: name,
//! type, cost, base stats, and the rules that govern where it may move
//! and how it fights. Definitions are built once by the host and shared
//! between instances behind an `Arc`.
//!
//! Instance-specific data (current stats, slot) is stored separately in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::combat::CombatRule;
use crate::rules::PlayRule;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Object,
    Equipment,
    Environment,
    Spell,
}

/// A mutable card statistic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Power,
    Health,
    Speed,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{CardDefinition, CardId, CardType};
/// use lane_ccg::combat::CombatRule;
///
/// let knight = CardDefinition::new(CardId::new(1), "Knight", CardType::Creature)
///     .with_cost(2)
///     .with_stats(3, 4, 1)
///     .with_combat_rule(CombatRule::Melee);
///
/// assert_eq!(knight.power, 3);
/// assert!(knight.is_creature());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    pub card_type: CardType,

    pub mana_cost: i64,

    /// Base power.
    pub power: i64,

    /// Base health.
    pub health: i64,

    /// Base speed.
    pub speed: i64,

    /// Ordered move-legality rules, evaluated for player and effect moves.
    pub play_rules: Vec<PlayRule>,

    /// Rules applied when this card attacks from a combat slot.
    pub combat_rules: Vec<CombatRule>,
}

impl CardDefinition {
    /// Create a definition with zero cost and stats and no rules.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            mana_cost: 0,
            power: 0,
            health: 0,
            speed: 0,
            play_rules: Vec::new(),
            combat_rules: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i64) -> Self {
        self.mana_cost = cost;
        self
    }

    /// Set base power, health and speed.
    #[must_use]
    pub fn with_stats(mut self, power: i64, health: i64, speed: i64) -> Self {
        self.power = power;
        self.health = health;
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_play_rule(mut self, rule: PlayRule) -> Self {
        self.play_rules.push(rule);
        self
    }

    #[must_use]
    pub fn with_combat_rule(mut self, rule: CombatRule) -> Self {
        self.combat_rules.push(rule);
        self
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    /// Check the definition can be put into play.
    ///
    /// Creatures need positive health, otherwise they would enter play
    /// already dead.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("card has no name".to_string());
        }
        if self.is_creature() && self.health <= 0 {
            return Err(format!("creature {} has no health", self.name));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_definition_builder() {
        let card = CardDefinition::new(CardId::new(1), "Archer", CardType::Creature)
            .with_cost(3)
            .with_stats(2, 2, 1)
            .with_play_rule(PlayRule::AllowLaneStep)
            .with_combat_rule(CombatRule::Ranged { range: 2 });

        assert_eq!(card.name, "Archer");
        assert_eq!(card.mana_cost, 3);
        assert_eq!((card.power, card.health, card.speed), (2, 2, 1));
        assert_eq!(card.play_rules.len(), 1);
        assert_eq!(card.combat_rules, vec![CombatRule::Ranged { range: 2 }]);
    }

    #[test]
    fn test_validate() {
        let ok = CardDefinition::new(CardId::new(1), "Wall", CardType::Creature).with_stats(0, 5, 0);
        assert!(ok.validate().is_ok());

        let dead = CardDefinition::new(CardId::new(2), "Ghost", CardType::Creature);
        assert!(dead.validate().is_err());

        let spell = CardDefinition::new(CardId::new(3), "Bolt", CardType::Spell);
        assert!(spell.validate().is_ok());

        let unnamed = CardDefinition::new(CardId::new(4), "  ", CardType::Object);
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_card_definition_serialization() {
        let card = CardDefinition::new(CardId::new(1), "Test", CardType::Spell).with_cost(2);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardDefinition = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
