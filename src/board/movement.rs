//! Move commitment and lane advancement.
//!
//! Every move goes through `MoveRules::can_move` first. Only an approved
//! move touches the arenas, so a rejected request leaves the board exactly
//! as it was.

use tracing::debug;

use super::Board;
use crate::core::{CardHandle, GameEvent, MoveDenial, SlotId};
use crate::rules::{MoveKind, MoveRules};

impl Board {
    /// Validate and commit a move.
    ///
    /// When the destination is an occupied hand slot the card lands in the
    /// hand's first empty slot instead; the published `CardMoved` names the
    /// slot it actually landed in.
    pub fn try_move_card(
        &mut self,
        card: CardHandle,
        from: SlotId,
        to: SlotId,
        kind: MoveKind,
    ) -> Result<(), MoveDenial> {
        MoveRules::can_move(self, card, from, to, kind)?;

        let landing = self.landing_slot(to).ok_or(MoveDenial::DestinationOccupied)?;
        self.commit_move(card, from, landing);

        debug!(%card, %from, to = %landing, ?kind, "card moved");
        self.publish(GameEvent::CardMoved { card, from, to: landing });
        Ok(())
    }

    /// Whether any slot would accept `card` under `kind`.
    ///
    /// Structural prefilter: empty slots and hand slots. Meant for UI
    /// affordances; `try_move_card` remains the authority.
    #[must_use]
    pub fn has_valid_destination(&self, card: CardHandle, kind: MoveKind) -> bool {
        let Some(from) = self.card(card).and_then(|c| c.slot) else {
            return false;
        };

        self.slots
            .iter()
            .filter(|slot| slot.id() != from)
            .filter(|slot| slot.is_empty() || self.zone_of(slot.id()).is_some_and(|z| z.is_hand()))
            .any(|slot| MoveRules::can_move(self, card, from, slot.id(), kind).is_ok())
    }

    /// Step every lane occupant one slot along its chain.
    ///
    /// Candidates are snapshotted before anything moves, so a card that
    /// advances in this pass does not free or block a slot for another
    /// card's decision in the same pass. Returns the number of cards moved.
    pub fn advance_all_one_step(&mut self) -> usize {
        let candidates: Vec<(CardHandle, SlotId, SlotId)> = self
            .slots
            .iter()
            .filter_map(|slot| Some((slot.occupant()?, slot.id(), slot.next()?)))
            .collect();

        let approved: Vec<(CardHandle, SlotId, SlotId)> = candidates
            .into_iter()
            .filter(|&(card, from, to)| MoveRules::can_move(self, card, from, to, MoveKind::System).is_ok())
            .collect();

        for &(card, from, to) in &approved {
            self.commit_move(card, from, to);
            self.publish(GameEvent::CardMoved { card, from, to });
        }

        if !approved.is_empty() {
            debug!(moved = approved.len(), "lane advanced");
        }
        approved.len()
    }

    /// Resolve where a card headed for `to` actually lands.
    fn landing_slot(&self, to: SlotId) -> Option<SlotId> {
        let slot = self.slot(to)?;
        if slot.is_empty() {
            return Some(to);
        }
        let zone = self.zone_of(to)?;
        if zone.is_hand() {
            self.first_empty_slot(zone)
        } else {
            None
        }
    }

    fn commit_move(&mut self, card: CardHandle, from: SlotId, to: SlotId) {
        if let Some(source) = self.slots.get_mut(from.index()) {
            source.occupant = None;
        }
        if let Some(dest) = self.slots.get_mut(to.index()) {
            dest.occupant = Some(card);
        }
        if let Some(instance) = self.cards.get_mut(&card) {
            instance.slot = Some(to);
        }
    }
}
