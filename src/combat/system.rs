//! Combat resolution.

use tracing::trace;

use super::context::{CombatContext, CombatResult};
use super::lane::CombatLane;
use crate::battle::PlayerState;
use crate::board::Board;
use crate::core::{Side, SideMap};

/// Resolves one combat exchange.
pub struct CombatSystem;

impl CombatSystem {
    /// Compute the exchange for the active side.
    ///
    /// Only the active side's combat-slot occupant acts; every combat rule
    /// on its definition runs in order against one context. Nothing is
    /// mutated. An empty combat slot yields an empty result.
    pub fn resolve(
        board: &Board,
        lane: &CombatLane,
        players: &SideMap<PlayerState>,
        is_player_turn: bool,
    ) -> CombatResult {
        let attacker_side = Side::active(is_player_turn);
        let mut ctx = CombatContext::new(board, lane, players, attacker_side);

        let attacker = lane
            .combat_slot(attacker_side)
            .and_then(|slot| board.occupant(slot));

        if let Some(attacker) = attacker {
            trace!(card = %attacker.handle, rules = attacker.definition.combat_rules.len(), "attacker acts");
            for rule in &attacker.definition.combat_rules {
                rule.apply(&mut ctx, attacker.handle);
            }
        }

        ctx.into_result()
    }
}
