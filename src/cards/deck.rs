//! Decks: ordered piles of card definitions waiting to be drawn.
//!
//! Backed by `im::Vector` so a deck can be cloned in O(1) when the host
//! wants a snapshot (e.g. to preview a shuffle).

use std::sync::Arc;

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::definition::{CardDefinition, CardId};
use super::registry::CardRegistry;
use crate::core::GameRng;

/// An ordered deck. Index 0 is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Arc<CardDefinition>>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from definitions, first element on top.
    pub fn from_cards(cards: impl IntoIterator<Item = Arc<CardDefinition>>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Build a deck from a list of card IDs.
    ///
    /// Unknown IDs are skipped with a warning.
    pub fn from_ids(registry: &CardRegistry, ids: &[CardId]) -> Self {
        let cards = ids.iter().filter_map(|&id| {
            let card = registry.get(id);
            if card.is_none() {
                warn!(%id, "deck list references an unregistered card");
            }
            card
        });
        Self::from_cards(cards)
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<Arc<CardDefinition>> {
        self.cards.pop_front()
    }

    /// Put a card back on top.
    pub fn put_on_top(&mut self, card: Arc<CardDefinition>) {
        self.cards.push_front(card);
    }

    /// Look at the top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Arc<CardDefinition>> {
        self.cards.front()
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<_> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardDefinition>> {
        self.cards.iter()
    }
}
