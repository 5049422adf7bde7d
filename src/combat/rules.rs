//! Combat rules attached to creature definitions.

use serde::{Deserialize, Serialize};

use super::context::CombatContext;
use super::targeting::find_enemy_in_range;
use crate::core::CardHandle;

/// How a creature fights when it stands in its combat slot.
///
/// Both variants strike the nearest opposing card within reach for the
/// attacker's current power, and hit the opposing player when nothing is
/// in reach.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatRule {
    /// Reaches only the opposing combat slot.
    Melee,
    /// Reaches `range` slots back from the opposing combat slot.
    Ranged { range: u32 },
}

impl CombatRule {
    #[must_use]
    pub fn range(&self) -> u32 {
        match self {
            CombatRule::Melee => 0,
            CombatRule::Ranged { range } => *range,
        }
    }

    /// Record this rule's hit for `attacker`.
    pub fn apply(&self, ctx: &mut CombatContext<'_>, attacker: CardHandle) {
        let Some(card) = ctx.board().card(attacker) else {
            return;
        };
        let (side, power) = (card.side, card.power);
        if power <= 0 {
            return;
        }

        match find_enemy_in_range(ctx, side, self.range()) {
            Some(target) => ctx.hit_card(attacker, target, power),
            None => ctx.hit_player(attacker, side.opponent(), power),
        }
    }
}
