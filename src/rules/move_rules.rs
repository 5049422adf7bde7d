//! Move legality.
//!
//! `MoveRules::can_move` is a pure decision over a proposed move. Checks
//! run in a fixed order and the first failure wins:
//!
//! 1. request sanity (card and slots exist, not the same slot, card is
//!    actually in the source slot)
//! 2. zone ownership (both zones belong to the card's side)
//! 3. per-authority checks: `System` moves must follow the lane chain;
//!    `Player` and `Effect` moves are decided by the card's play rules
//! 4. destination capacity

use serde::{Deserialize, Serialize};

use super::play_rule::{evaluate_rules, MoveRequest};
use crate::board::Board;
use crate::core::{CardHandle, MoveDenial, SlotId};
use crate::zones::{Slot, Zone};

/// The authority initiating a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    /// A player drag/drop or AI decision.
    Player,
    /// Automatic lane progression.
    System,
    /// A card effect.
    Effect,
}

/// Move legality evaluator.
pub struct MoveRules;

impl MoveRules {
    /// Decide whether `card` may move from `from` to `to`.
    pub fn can_move(
        board: &Board,
        card: CardHandle,
        from: SlotId,
        to: SlotId,
        kind: MoveKind,
    ) -> Result<(), MoveDenial> {
        let instance = board.card(card).ok_or(MoveDenial::UnknownCard(card))?;
        let from_slot = board.slot(from).ok_or(MoveDenial::UnknownSlot(from))?;
        let to_slot = board.slot(to).ok_or(MoveDenial::UnknownSlot(to))?;
        if from == to {
            return Err(MoveDenial::SameSlot);
        }
        if instance.slot != Some(from) || from_slot.occupant() != Some(card) {
            return Err(MoveDenial::NotAtSource { card, slot: from });
        }

        let from_zone = board.zone_of(from).ok_or(MoveDenial::UnknownSlot(from))?;
        let to_zone = board.zone_of(to).ok_or(MoveDenial::UnknownSlot(to))?;
        if to_zone.side() != instance.side {
            return Err(MoveDenial::DestinationNotOwned);
        }
        if from_zone.side() != instance.side {
            return Err(MoveDenial::SourceNotOwned);
        }

        match kind {
            MoveKind::System => {
                if from_slot.next() != Some(to) {
                    return Err(MoveDenial::NotNextSlot);
                }
            }
            MoveKind::Player | MoveKind::Effect => {
                let request = MoveRequest {
                    card: instance,
                    from: from_slot,
                    to: to_slot,
                    from_zone,
                    to_zone,
                    kind,
                    mana: board.mana_ledger(),
                };
                evaluate_rules(&instance.definition.play_rules, &request)?;
            }
        }

        Self::check_capacity(board, to_zone, to_slot)
    }

    /// A slot holds at most one card. An occupied hand slot is acceptable
    /// while the hand still has a free slot; the board lands the card there.
    fn check_capacity(board: &Board, to_zone: &Zone, to_slot: &Slot) -> Result<(), MoveDenial> {
        if to_slot.is_empty() {
            return Ok(());
        }
        if to_zone.is_hand() && board.first_empty_slot(to_zone).is_some() {
            return Ok(());
        }
        Err(MoveDenial::DestinationOccupied)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardDefinition, CardId, CardType};
    use crate::core::{BoardLayout, EngineConfig, Side};
    use crate::rules::PlayRule;
    use crate::zones::ZoneKind;

    fn board() -> Board {
        let config = EngineConfig::default().with_hand_capacity(2).with_advance_slots(1);
        Board::new(&BoardLayout::standard(&config)).unwrap()
    }

    fn creature(rules: Vec<PlayRule>) -> Arc<CardDefinition> {
        let mut def = CardDefinition::new(CardId::new(1), "Pikeman", CardType::Creature).with_stats(2, 2, 1);
        def.play_rules = rules;
        Arc::new(def)
    }

    fn slot(board: &Board, kind: ZoneKind, side: Side) -> SlotId {
        board.zone(kind, side).and_then(|z| z.slot_at(0)).unwrap()
    }

    #[test]
    fn test_same_slot_rejected() {
        let mut board = board();
        let card = board.try_spawn_card(&creature(vec![]), ZoneKind::Hand, Side::Player, None).unwrap();
        let hand = slot(&board, ZoneKind::Hand, Side::Player);

        assert_eq!(
            MoveRules::can_move(&board, card, hand, hand, MoveKind::Player),
            Err(MoveDenial::SameSlot)
        );
    }

    #[test]
    fn test_unknown_card_and_slot() {
        let board = board();
        let hand = slot(&board, ZoneKind::Hand, Side::Player);

        assert_eq!(
            MoveRules::can_move(&board, CardHandle(99), hand, SlotId::new(1), MoveKind::Player),
            Err(MoveDenial::UnknownCard(CardHandle(99)))
        );
    }

    #[test]
    fn test_destination_must_be_owned() {
        let mut board = board();
        let def = creature(vec![PlayRule::AllowToZone(ZoneKind::Deployment)]);
        let card = board.try_spawn_card(&def, ZoneKind::Hand, Side::Player, None).unwrap();
        let hand = slot(&board, ZoneKind::Hand, Side::Player);
        let enemy_deploy = slot(&board, ZoneKind::Deployment, Side::Enemy);

        assert_eq!(
            MoveRules::can_move(&board, card, hand, enemy_deploy, MoveKind::Player),
            Err(MoveDenial::DestinationNotOwned)
        );
    }

    #[test]
    fn test_system_move_follows_chain() {
        let mut board = board();
        let card = board.try_spawn_card(&creature(vec![]), ZoneKind::Deployment, Side::Player, None).unwrap();
        let deploy = slot(&board, ZoneKind::Deployment, Side::Player);
        let advance = slot(&board, ZoneKind::Advance, Side::Player);
        let combat = slot(&board, ZoneKind::Combat, Side::Player);

        assert_eq!(MoveRules::can_move(&board, card, deploy, advance, MoveKind::System), Ok(()));
        assert_eq!(
            MoveRules::can_move(&board, card, deploy, combat, MoveKind::System),
            Err(MoveDenial::NotNextSlot)
        );
    }

    #[test]
    fn test_system_move_needs_empty_destination() {
        let mut board = board();
        let def = creature(vec![]);
        let card = board.try_spawn_card(&def, ZoneKind::Deployment, Side::Player, None).unwrap();
        board.try_spawn_card(&def, ZoneKind::Advance, Side::Player, None).unwrap();
        let deploy = slot(&board, ZoneKind::Deployment, Side::Player);
        let advance = slot(&board, ZoneKind::Advance, Side::Player);

        assert_eq!(
            MoveRules::can_move(&board, card, deploy, advance, MoveKind::System),
            Err(MoveDenial::DestinationOccupied)
        );
    }

    #[test]
    fn test_player_move_uses_rules() {
        let mut board = board();
        let hand = slot(&board, ZoneKind::Hand, Side::Player);
        let deploy = slot(&board, ZoneKind::Deployment, Side::Player);

        let stuck = board.try_spawn_card(&creature(vec![]), ZoneKind::Hand, Side::Player, Some(0)).unwrap();
        assert_eq!(
            MoveRules::can_move(&board, stuck, hand, deploy, MoveKind::Player),
            Err(MoveDenial::NoRuleAllows)
        );

        let free_def = creature(vec![PlayRule::AllowFromTo { from: ZoneKind::Hand, to: ZoneKind::Deployment }]);
        let free = board.try_spawn_card(&free_def, ZoneKind::Hand, Side::Player, Some(1)).unwrap();
        let hand_1 = board.zone(ZoneKind::Hand, Side::Player).and_then(|z| z.slot_at(1)).unwrap();
        assert_eq!(MoveRules::can_move(&board, free, hand_1, deploy, MoveKind::Effect), Ok(()));
    }

    #[test]
    fn test_card_must_be_in_source_slot() {
        let mut board = board();
        let card = board.try_spawn_card(&creature(vec![]), ZoneKind::Hand, Side::Player, Some(0)).unwrap();
        let other_hand = board.zone(ZoneKind::Hand, Side::Player).and_then(|z| z.slot_at(1)).unwrap();
        let deploy = slot(&board, ZoneKind::Deployment, Side::Player);

        assert_eq!(
            MoveRules::can_move(&board, card, other_hand, deploy, MoveKind::Player),
            Err(MoveDenial::NotAtSource { card, slot: other_hand })
        );
    }
}
