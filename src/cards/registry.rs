//! Card registry for definition lookup.
//!
//! The host loads card definitions however it likes and registers them
//! here. Lookups hand out shared `Arc<CardDefinition>`s so every deck
//! entry and instance points at the same immutable data.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardType};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use lane_ccg::cards::{CardDefinition, CardId, CardRegistry, CardType};
///
/// let mut registry = CardRegistry::new();
/// registry.register(
///     CardDefinition::new(CardId::new(1), "Footman", CardType::Creature).with_stats(1, 2, 1),
/// );
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Footman");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists; duplicate IDs
    /// are a content bug, not a game condition.
    pub fn register(&mut self, card: CardDefinition) -> Arc<CardDefinition> {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        let card = Arc::new(card);
        self.cards.insert(card.id, Arc::clone(&card));
        card
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<Arc<CardDefinition>> {
        self.cards.get(&id).cloned()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.values().filter(move |c| c.card_type == card_type)
    }
}
