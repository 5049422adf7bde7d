//! The turn state machine.
//!
//! A turn runs `Draw -> Main -> Movement -> Combat -> EnemyTurn` and
//! back to `Draw`. `Main` is the only phase that waits for the host
//! (`PhaseManager::end_main_phase`); every other phase finishes its work
//! on entry or when its timer runs out.
//!
//! The manager owns the transition table and one `PhaseHandler` per
//! phase. Handlers do the per-phase work; the manager publishes
//! `PhaseEntered`/`PhaseExited`/`TurnCompleted` and checks for a winner
//! whenever combat damage lands.

mod handlers;
mod input;
mod manager;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::battle::Battle;
use crate::combat::CombatResult;

pub use handlers::{CombatPhase, DrawPhase, MainPhase, MovementPhase};
pub use input::InputGate;
pub use manager::PhaseManager;

/// The phases of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseType {
    Draw,
    Main,
    Movement,
    Combat,
    EnemyTurn,
}

impl PhaseType {
    /// All phases in turn order.
    pub const ALL: [PhaseType; 5] = [
        PhaseType::Draw,
        PhaseType::Main,
        PhaseType::Movement,
        PhaseType::Combat,
        PhaseType::EnemyTurn,
    ];

    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            PhaseType::Draw => PhaseType::Main,
            PhaseType::Main => PhaseType::Movement,
            PhaseType::Movement => PhaseType::Combat,
            PhaseType::Combat => PhaseType::EnemyTurn,
            PhaseType::EnemyTurn => PhaseType::Draw,
        }
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    PlayerWon,
    EnemyWon,
    /// Both sides fell in the same exchange.
    Draw,
}

/// Whether a handler is done with its phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseStatus {
    Waiting,
    Complete,
}

/// What a handler may touch while its phase runs.
pub struct PhaseContext<'a> {
    pub battle: &'a mut Battle,

    /// Combat computed this phase and not yet applied.
    pub pending_combat: &'a mut Option<CombatResult>,
}

/// Per-phase behaviour.
pub trait PhaseHandler: std::fmt::Debug {
    /// The phase this handler drives.
    fn phase(&self) -> PhaseType;

    /// Called once when the phase is entered.
    fn on_enter(&mut self, ctx: &mut PhaseContext<'_>) -> PhaseStatus;

    /// Called on every tick while the phase is current.
    fn on_tick(&mut self, _ctx: &mut PhaseContext<'_>, _dt: Duration) -> PhaseStatus {
        PhaseStatus::Waiting
    }
}
