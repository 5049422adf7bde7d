//! Bringing cards into play and taking them out again.

use std::sync::Arc;

use tracing::debug;

use super::Board;
use crate::cards::{CardDefinition, CardInstance, Deck};
use crate::core::{CardHandle, DrawError, GameEvent, Side, SlotId, SpawnError};
use crate::zones::ZoneKind;

impl Board {
    /// Place a new instance of `definition` into a zone.
    ///
    /// With `slot_index` the card goes exactly there; without one it takes
    /// the zone's first empty slot.
    pub fn try_spawn_card(
        &mut self,
        definition: &Arc<CardDefinition>,
        kind: ZoneKind,
        side: Side,
        slot_index: Option<usize>,
    ) -> Result<CardHandle, SpawnError> {
        definition.validate().map_err(SpawnError::InvalidCard)?;

        let zone = self.zone(kind, side).ok_or(SpawnError::ZoneNotFound { kind, side })?;
        let slot = match slot_index {
            Some(index) => {
                let slot = zone.slot_at(index).ok_or(SpawnError::SlotOutOfRange {
                    index,
                    capacity: zone.capacity(),
                })?;
                if self.slot(slot).is_some_and(|s| !s.is_empty()) {
                    return Err(SpawnError::SlotOccupied { index });
                }
                slot
            }
            None => self
                .first_empty_slot(zone)
                .ok_or(SpawnError::ZoneFull { kind, side })?,
        };

        let handle = self.allocate_handle();
        self.place(CardInstance::new(handle, Arc::clone(definition), side), slot);

        debug!(card = %handle, name = %definition.name, %slot, "card spawned");
        self.publish(GameEvent::CardSpawned { card: handle, slot });
        Ok(handle)
    }

    /// Draw the top card of `deck` into `side`'s hand.
    ///
    /// The deck is only touched once the hand is known to have room.
    pub fn draw_into_hand(&mut self, deck: &mut Deck, side: Side) -> Result<CardHandle, DrawError> {
        let hand = self.zone(ZoneKind::Hand, side).ok_or(DrawError::NoHandZone(side))?;
        if self.first_empty_slot(hand).is_none() {
            return Err(DrawError::HandFull(side));
        }
        let definition = deck.draw().ok_or(DrawError::DeckEmpty(side))?;

        match self.try_spawn_card(&definition, ZoneKind::Hand, side, None) {
            Ok(handle) => Ok(handle),
            Err(_) => {
                // Only an invalid definition gets here; keep the deck intact.
                deck.put_on_top(definition);
                Err(DrawError::HandFull(side))
            }
        }
    }

    /// Remove a card from play regardless of its health.
    ///
    /// Health is forced to zero and the card is detached from its slot.
    /// Returns the removed instance.
    pub fn destroy_card(&mut self, handle: CardHandle) -> Option<CardInstance> {
        let mut card = self.cards.remove(&handle)?;
        card.health = 0;

        let slot = card.slot.take();
        if let Some(slot) = slot.and_then(|id| self.slots.get_mut(id.index())) {
            if slot.occupant == Some(handle) {
                slot.occupant = None;
            }
        }

        debug!(card = %handle, name = %card.name(), "card destroyed");
        self.publish(GameEvent::CardDestroyed { card: handle, slot });
        Some(card)
    }

    /// Remove every card whose health has dropped to zero or below.
    ///
    /// Returns the removed handles in slot order.
    pub fn clear_defeated(&mut self) -> Vec<CardHandle> {
        let defeated: Vec<CardHandle> = self
            .cards_in_slot_order()
            .filter(|card| card.is_defeated())
            .map(|card| card.handle)
            .collect();

        for &handle in &defeated {
            self.destroy_card(handle);
        }
        defeated
    }

    fn allocate_handle(&mut self) -> CardHandle {
        let handle = CardHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Attach an instance to an empty slot and take ownership of it.
    fn place(&mut self, mut card: CardInstance, slot: SlotId) {
        card.slot = Some(slot);
        if let Some(target) = self.slots.get_mut(slot.index()) {
            target.occupant = Some(card.handle);
        }
        self.cards.insert(card.handle, card);
    }
}
