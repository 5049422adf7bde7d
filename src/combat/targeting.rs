//! Lane targeting.

use super::context::CombatContext;
use crate::core::{CardHandle, Side};

/// Nearest opposing card within `range` of the opposing combat slot.
///
/// `side` is the attacker's side; the opposing path is scanned and only
/// slots whose distance is at most `range` are considered. The smallest
/// distance wins; equal distances keep the first one found in path order.
pub fn find_enemy_in_range(ctx: &CombatContext<'_>, side: Side, range: u32) -> Option<CardHandle> {
    let lane = ctx.lane();
    let board = ctx.board();
    let mut best: Option<(u32, CardHandle)> = None;

    for &slot in lane.path(side.opponent()) {
        let Some(distance) = lane.distance(slot) else {
            continue;
        };
        if distance > range {
            continue;
        }
        let Some(occupant) = board.slot(slot).and_then(|s| s.occupant()) else {
            continue;
        };
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, occupant));
        }
    }

    best.map(|(_, card)| card)
}
