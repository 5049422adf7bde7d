//! Built-in phase handlers.

use std::time::Duration;

use tracing::{debug, warn};

use super::{PhaseContext, PhaseHandler, PhaseStatus, PhaseType};
use crate::battle::Battle;
use crate::combat::CombatResult;
use crate::core::Side;

/// Counts up to a fixed duration.
#[derive(Clone, Copy, Debug, Default)]
struct Timer {
    duration: Duration,
    elapsed: Duration,
}

impl Timer {
    fn new(duration: Duration) -> Self {
        Self { duration, elapsed: Duration::ZERO }
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.is_done()
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Apply a pending combat result once and sweep defeated cards.
pub(super) fn settle_combat(battle: &mut Battle, pending: &mut Option<CombatResult>) -> Option<CombatResult> {
    let result = pending.take()?;
    result.apply(&mut battle.board, &mut battle.players);
    let removed = battle.board.clear_defeated();
    debug!(
        damage_to_player = result.damage_to_player,
        damage_to_enemy = result.damage_to_enemy,
        removed = removed.len(),
        "combat applied"
    );
    Some(result)
}

/// Draws one card for the player.
#[derive(Debug, Default)]
pub struct DrawPhase;

impl PhaseHandler for DrawPhase {
    fn phase(&self) -> PhaseType {
        PhaseType::Draw
    }

    fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> PhaseStatus {
        let side = Side::Player;
        if let Err(err) = ctx.battle.draw(side) {
            warn!(%side, %err, "draw phase could not draw");
        }
        PhaseStatus::Complete
    }
}

/// Waits for the host to end the phase.
#[derive(Debug, Default)]
pub struct MainPhase;

impl PhaseHandler for MainPhase {
    fn phase(&self) -> PhaseType {
        PhaseType::Main
    }

    fn on_enter(&mut self, _ctx: &mut PhaseContext<'_>) -> PhaseStatus {
        PhaseStatus::Waiting
    }
}

/// Advances the lane one step, then waits out the movement delay.
#[derive(Debug)]
pub struct MovementPhase {
    timer: Timer,
}

impl MovementPhase {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { timer: Timer::new(delay) }
    }
}

impl PhaseHandler for MovementPhase {
    fn phase(&self) -> PhaseType {
        PhaseType::Movement
    }

    fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> PhaseStatus {
        let moved = ctx.battle.board.advance_all_one_step();
        debug!(moved, "movement phase advanced lane");

        self.timer.reset();
        if self.timer.is_done() {
            PhaseStatus::Complete
        } else {
            PhaseStatus::Waiting
        }
    }

    fn on_tick(&mut self, _ctx: &mut PhaseContext<'_>, dt: Duration) -> PhaseStatus {
        if self.timer.advance(dt) {
            PhaseStatus::Complete
        } else {
            PhaseStatus::Waiting
        }
    }
}

/// Resolves one side's combat and holds the result until it is applied.
///
/// Drives both `Combat` (player attacks) and `EnemyTurn` (enemy attacks).
/// If the host has not applied the result by the time the phase timer
/// runs out, the handler applies it.
#[derive(Debug)]
pub struct CombatPhase {
    phase: PhaseType,
    is_player_turn: bool,
    timer: Timer,
}

impl CombatPhase {
    /// The player's combat phase.
    #[must_use]
    pub fn player(duration: Duration) -> Self {
        Self {
            phase: PhaseType::Combat,
            is_player_turn: true,
            timer: Timer::new(duration),
        }
    }

    /// The enemy turn. No decisions are made; only its combat slot acts.
    #[must_use]
    pub fn enemy(duration: Duration) -> Self {
        Self {
            phase: PhaseType::EnemyTurn,
            is_player_turn: false,
            timer: Timer::new(duration),
        }
    }

    fn finish(&self, ctx: &mut PhaseContext<'_>) -> PhaseStatus {
        settle_combat(ctx.battle, ctx.pending_combat);
        PhaseStatus::Complete
    }
}

impl PhaseHandler for CombatPhase {
    fn phase(&self) -> PhaseType {
        self.phase
    }

    fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> PhaseStatus {
        settle_combat(ctx.battle, ctx.pending_combat);

        let battle = &mut *ctx.battle;
        *ctx.pending_combat = battle.board.begin_main_combat(&battle.players, self.is_player_turn);

        self.timer.reset();
        if self.timer.is_done() {
            self.finish(ctx)
        } else {
            PhaseStatus::Waiting
        }
    }

    fn on_tick(&mut self, ctx: &mut PhaseContext<'_>, dt: Duration) -> PhaseStatus {
        if self.timer.advance(dt) {
            self.finish(ctx)
        } else {
            PhaseStatus::Waiting
        }
    }
}
