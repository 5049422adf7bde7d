//! Whether the player may pick up a card.

use super::PhaseType;
use crate::board::Board;
use crate::core::{CardHandle, Side};
use crate::rules::MoveKind;

/// Input permission policy for drag-and-drop.
///
/// Advisory only: a drag it allows can still be refused by
/// `Board::try_move_card`.
pub struct InputGate;

impl InputGate {
    /// A card may be dragged when it is the player's, the battle is in
    /// `Main`, and the card has somewhere legal to go.
    #[must_use]
    pub fn can_drag(phase: Option<PhaseType>, board: &Board, card: CardHandle) -> bool {
        if phase != Some(PhaseType::Main) {
            return false;
        }
        let Some(instance) = board.card(card) else {
            return false;
        };
        instance.side == Side::Player && board.has_valid_destination(card, MoveKind::Player)
    }
}
