//! The board: authoritative positional state.
//!
//! `Board` owns every zone, slot and card instance in flat arenas and
//! refers between them by handle. It is the only place positional state
//! changes, through a small set of commit paths:
//!
//! - spawning (`try_spawn_card`, `draw_into_hand`)
//! - moving (`try_move_card`, `advance_all_one_step`)
//! - removal (`destroy_card`, `clear_defeated`)
//!
//! Each commit path validates first and mutates only on success, then
//! publishes a `GameEvent` to the board's outbox.
//!
//! The board also owns the single combat lane, wired once at
//! construction from both sides' deployment, advance and combat zones.

mod movement;
mod spawn;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use crate::battle::PlayerState;
use crate::cards::CardInstance;
use crate::combat::{CombatLane, CombatResult, CombatSystem};
use crate::core::{
    BoardError, BoardLayout, CardHandle, EventQueue, GameEvent, Side, SideMap, SlotId, ZoneId,
};
use crate::rules::ManaLedger;
use crate::zones::{Slot, Zone, ZoneKind};

/// The game board.
#[derive(Debug)]
pub struct Board {
    zones: Vec<Zone>,
    slots: Vec<Slot>,
    cards: FxHashMap<CardHandle, CardInstance>,
    next_handle: u32,
    lane: Option<CombatLane>,
    mana: Option<Box<dyn ManaLedger>>,
    events: EventQueue,
}

impl Board {
    /// Build a board from a layout.
    ///
    /// Fails only on wiring bugs (duplicate zones). A layout without the
    /// zones a lane needs still builds; combat is then a no-op.
    pub fn new(layout: &BoardLayout) -> Result<Self, BoardError> {
        let total_slots: usize = layout.zones.iter().map(|z| z.capacity).sum();
        if u32::try_from(total_slots).is_err() || u16::try_from(layout.zones.len()).is_err() {
            return Err(BoardError::TooManySlots(total_slots));
        }

        let mut zones: Vec<Zone> = Vec::with_capacity(layout.zones.len());
        let mut slots = Vec::with_capacity(total_slots);

        for (zone_index, config) in layout.zones.iter().enumerate() {
            if zones.iter().any(|z| z.kind == config.kind && z.side == config.side) {
                return Err(BoardError::DuplicateZone {
                    kind: config.kind,
                    side: config.side,
                });
            }

            let zone_id = ZoneId::new(zone_index as u16);
            let mut zone_slots = Vec::with_capacity(config.capacity);
            for index in 0..config.capacity {
                let slot_id = SlotId::new(slots.len() as u32);
                slots.push(Slot::new(slot_id, zone_id, index));
                zone_slots.push(slot_id);
            }

            zones.push(Zone {
                id: zone_id,
                kind: config.kind,
                side: config.side,
                slots: zone_slots,
            });
        }

        let mut board = Self {
            zones,
            slots,
            cards: FxHashMap::default(),
            next_handle: 1,
            lane: None,
            mana: None,
            events: EventQueue::new(),
        };
        board.lane = board.build_lane();
        Ok(board)
    }

    /// Wire both sides' lane chains and build the combat lane.
    fn build_lane(&mut self) -> Option<CombatLane> {
        let player_path = self.lane_path(Side::Player);
        let enemy_path = self.lane_path(Side::Enemy);

        let (Some(player_path), Some(enemy_path)) = (player_path, enemy_path) else {
            warn!("board layout lacks deployment/advance/combat zones for both sides; combat disabled");
            return None;
        };

        for path in [&player_path, &enemy_path] {
            for pair in path.windows(2) {
                self.slots[pair[0].index()].next = Some(pair[1]);
            }
        }

        Some(CombatLane::new(player_path, enemy_path))
    }

    /// First deployment slot, every advance slot, first combat slot.
    fn lane_path(&self, side: Side) -> Option<Vec<SlotId>> {
        let deploy = self.zone(ZoneKind::Deployment, side)?.slot_at(0)?;
        let advance = self.zone(ZoneKind::Advance, side)?;
        let combat = self.zone(ZoneKind::Combat, side)?.slot_at(0)?;

        let mut path = Vec::with_capacity(advance.capacity() + 2);
        path.push(deploy);
        path.extend_from_slice(advance.slots());
        path.push(combat);
        Some(path)
    }

    // === Lookup ===

    /// Zone by kind and owning side.
    #[must_use]
    pub fn zone(&self, kind: ZoneKind, side: Side) -> Option<&Zone> {
        self.zones.iter().find(|z| z.kind == kind && z.side == side)
    }

    #[must_use]
    pub fn zone_by_id(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(id.index())
    }

    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Zone containing a slot.
    #[must_use]
    pub fn zone_of(&self, slot: SlotId) -> Option<&Zone> {
        self.slot(slot).and_then(|s| self.zone_by_id(s.zone))
    }

    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    /// Every slot on the board in allocation order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn card(&self, handle: CardHandle) -> Option<&CardInstance> {
        self.cards.get(&handle)
    }

    pub fn card_mut(&mut self, handle: CardHandle) -> Option<&mut CardInstance> {
        self.cards.get_mut(&handle)
    }

    /// Card occupying a slot.
    #[must_use]
    pub fn occupant(&self, slot: SlotId) -> Option<&CardInstance> {
        self.slot(slot)
            .and_then(|s| s.occupant)
            .and_then(|handle| self.card(handle))
    }

    /// Cards on the board in slot order.
    pub fn cards_in_slot_order(&self) -> impl Iterator<Item = &CardInstance> {
        self.slots
            .iter()
            .filter_map(|s| s.occupant)
            .filter_map(|handle| self.cards.get(&handle))
    }

    /// Cards in one zone, in slot order.
    pub fn cards_in_zone(&self, kind: ZoneKind, side: Side) -> Vec<CardHandle> {
        self.zone(kind, side)
            .map(|zone| {
                zone.slots()
                    .iter()
                    .filter_map(|&id| self.slot(id).and_then(|s| s.occupant))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// First empty slot in a zone.
    #[must_use]
    pub fn first_empty_slot(&self, zone: &Zone) -> Option<SlotId> {
        zone.slots()
            .iter()
            .copied()
            .find(|&id| self.slot(id).is_some_and(Slot::is_empty))
    }

    /// The combat lane, if the layout supports one.
    #[must_use]
    pub fn lane(&self) -> Option<&CombatLane> {
        self.lane.as_ref()
    }

    // === Collaborators ===

    /// Install the mana ledger consulted by play rules.
    pub fn set_mana_ledger(&mut self, ledger: Box<dyn ManaLedger>) {
        self.mana = Some(ledger);
    }

    #[must_use]
    pub fn mana_ledger(&self) -> Option<&dyn ManaLedger> {
        self.mana.as_deref()
    }

    pub fn mana_ledger_mut(&mut self) -> Option<&mut (dyn ManaLedger + 'static)> {
        self.mana.as_deref_mut()
    }

    // === Events ===

    pub(crate) fn publish(&mut self, event: GameEvent) {
        self.events.publish(event);
    }

    /// Take every pending notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Pending notifications, not consumed.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.pending()
    }

    // === Combat ===

    /// Resolve one combat exchange on the main lane.
    ///
    /// Returns `None` when the board has no lane. The result is published
    /// as `CombatBegun` but not applied; the caller decides when health
    /// actually changes.
    pub fn begin_main_combat(
        &mut self,
        players: &SideMap<PlayerState>,
        is_player_turn: bool,
    ) -> Option<CombatResult> {
        let lane = self.lane.as_ref()?;
        let result = CombatSystem::resolve(self, lane, players, is_player_turn);
        debug!(
            attacker = %Side::active(is_player_turn),
            hits = result.hits.len(),
            "combat resolved"
        );
        self.publish(GameEvent::CombatBegun(result.clone()));
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineConfig;

    fn standard() -> Board {
        Board::new(&BoardLayout::standard(&EngineConfig::default())).unwrap()
    }

    #[test]
    fn test_zone_lookup() {
        let board = standard();
        let hand = board.zone(ZoneKind::Hand, Side::Enemy).unwrap();
        assert_eq!(hand.capacity(), 10);
        assert_eq!(hand.side(), Side::Enemy);
        assert!(board.zone_by_id(hand.id()).is_some());
    }

    #[test]
    fn test_duplicate_zone_rejected() {
        let layout = BoardLayout::new()
            .with_zone(ZoneKind::Hand, Side::Player, 3)
            .with_zone(ZoneKind::Hand, Side::Player, 5);

        assert_eq!(
            Board::new(&layout).unwrap_err(),
            BoardError::DuplicateZone { kind: ZoneKind::Hand, side: Side::Player }
        );
    }

    #[test]
    fn test_lane_chain_is_wired() {
        let board = standard();
        let deploy = board.zone(ZoneKind::Deployment, Side::Player).unwrap().slot_at(0).unwrap();
        let advance = board.zone(ZoneKind::Advance, Side::Player).unwrap();
        let combat = board.zone(ZoneKind::Combat, Side::Player).unwrap().slot_at(0).unwrap();

        assert_eq!(board.slot(deploy).unwrap().next(), advance.slot_at(0));
        assert_eq!(board.slot(advance.slot_at(0).unwrap()).unwrap().next(), advance.slot_at(1));
        assert_eq!(board.slot(advance.slot_at(1).unwrap()).unwrap().next(), Some(combat));
        assert_eq!(board.slot(combat).unwrap().next(), None);

        let lane = board.lane().unwrap();
        assert_eq!(lane.distance(combat), Some(0));
        assert_eq!(lane.distance(deploy), Some(3));
    }

    #[test]
    fn test_missing_zones_disable_lane() {
        let layout = BoardLayout::new()
            .with_zone(ZoneKind::Hand, Side::Player, 3)
            .with_zone(ZoneKind::Combat, Side::Player, 1)
            .with_zone(ZoneKind::Combat, Side::Enemy, 1);
        let mut board = Board::new(&layout).unwrap();

        assert!(board.lane().is_none());
        let players = SideMap::new(|side| PlayerState::new(side, 20));
        assert!(board.begin_main_combat(&players, true).is_none());
        assert!(board.drain_events().is_empty());
    }
}
