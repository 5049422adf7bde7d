//! Phase transitions.

use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::handlers::{settle_combat, CombatPhase, DrawPhase, MainPhase, MovementPhase};
use super::{GameOutcome, PhaseContext, PhaseHandler, PhaseStatus, PhaseType};
use crate::battle::Battle;
use crate::combat::CombatResult;
use crate::core::{EngineConfig, GameEvent};

/// Drives a battle through its turns.
///
/// The manager only moves when called: `start` once, `tick` once per host
/// frame, `end_main_phase` when the player is done. Phases that finish on
/// entry chain straight into the next one within the same call.
#[derive(Debug)]
pub struct PhaseManager {
    handlers: FxHashMap<PhaseType, Box<dyn PhaseHandler>>,
    current: Option<PhaseType>,
    turn: u32,
    pending_combat: Option<CombatResult>,
    outcome: Option<GameOutcome>,
    /// `current` was chosen but its handler has not been entered yet.
    entry_deferred: bool,
}

impl PhaseManager {
    /// A manager with the built-in handlers, timed from `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            handlers: FxHashMap::default(),
            current: None,
            turn: 1,
            pending_combat: None,
            outcome: None,
            entry_deferred: false,
        }
        .with_handler(DrawPhase)
        .with_handler(MainPhase)
        .with_handler(MovementPhase::new(config.movement_delay))
        .with_handler(CombatPhase::player(config.combat_duration))
        .with_handler(CombatPhase::enemy(config.enemy_turn_duration))
    }

    /// Replace the handler for the phase it drives.
    #[must_use]
    pub fn with_handler(mut self, handler: impl PhaseHandler + 'static) -> Self {
        self.handlers.insert(handler.phase(), Box::new(handler));
        self
    }

    /// Current phase; `None` before `start`.
    #[must_use]
    pub fn current(&self) -> Option<PhaseType> {
        self.current
    }

    /// The turn in progress, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Combat computed this phase and not yet applied.
    #[must_use]
    pub fn pending_combat(&self) -> Option<&CombatResult> {
        self.pending_combat.as_ref()
    }

    /// Enter the first `Draw` phase. Does nothing if already started.
    pub fn start(&mut self, battle: &mut Battle) {
        if self.current.is_some() {
            return;
        }
        self.enter(battle, PhaseType::Draw);
    }

    /// Advance timers for the current phase.
    pub fn tick(&mut self, battle: &mut Battle, dt: Duration) {
        let Some(phase) = self.current else {
            return;
        };
        if self.is_over() {
            return;
        }
        if self.entry_deferred {
            self.entry_deferred = false;
            self.enter(battle, phase);
            return;
        }

        let status = {
            let Some(handler) = self.handlers.get_mut(&phase) else {
                return;
            };
            let mut ctx = PhaseContext {
                battle: &mut *battle,
                pending_combat: &mut self.pending_combat,
            };
            handler.on_tick(&mut ctx, dt)
        };

        if status == PhaseStatus::Complete {
            self.complete(battle, phase);
        }
    }

    /// Leave `Main`. Outside `Main` this does nothing and returns `false`.
    pub fn end_main_phase(&mut self, battle: &mut Battle) -> bool {
        if self.current != Some(PhaseType::Main) || self.is_over() || self.entry_deferred {
            return false;
        }
        self.complete(battle, PhaseType::Main);
        true
    }

    /// Apply the pending combat result now.
    ///
    /// Returns the applied result, or `None` if nothing was pending. The
    /// result is consumed, so it cannot be applied twice through the
    /// manager.
    pub fn apply_pending_combat(&mut self, battle: &mut Battle) -> Option<CombatResult> {
        let result = settle_combat(battle, &mut self.pending_combat)?;
        self.check_outcome(battle);
        Some(result)
    }

    /// The current phase has finished its work.
    fn complete(&mut self, battle: &mut Battle, phase: PhaseType) {
        if self.leave(battle, phase) {
            self.enter(battle, phase.next());
        }
    }

    /// Close out `phase`. Returns `false` if the battle ended instead.
    fn leave(&mut self, battle: &mut Battle, phase: PhaseType) -> bool {
        if matches!(phase, PhaseType::Combat | PhaseType::EnemyTurn) {
            self.check_outcome(battle);
        }
        if self.is_over() {
            return false;
        }

        battle.board.publish(GameEvent::PhaseExited(phase));
        if phase == PhaseType::EnemyTurn {
            battle.board.publish(GameEvent::TurnCompleted(self.turn));
            debug!(turn = self.turn, "turn completed");
            self.turn += 1;
        }
        true
    }

    /// Enter `phase`, chaining through phases that complete on entry.
    ///
    /// Chaining stops after one full cycle so a set of handlers that never
    /// wait cannot spin forever inside a single call. The phase after the
    /// last one left becomes current and is entered on the next `tick`.
    fn enter(&mut self, battle: &mut Battle, mut phase: PhaseType) {
        for _ in 0..PhaseType::ALL.len() {
            self.current = Some(phase);
            battle.board.publish(GameEvent::PhaseEntered(phase));
            debug!(?phase, turn = self.turn, "phase entered");

            let status = match self.handlers.get_mut(&phase) {
                Some(handler) => {
                    let mut ctx = PhaseContext {
                        battle: &mut *battle,
                        pending_combat: &mut self.pending_combat,
                    };
                    handler.on_enter(&mut ctx)
                }
                None => {
                    warn!(?phase, "no handler installed; skipping phase");
                    PhaseStatus::Complete
                }
            };

            if status == PhaseStatus::Waiting || !self.leave(battle, phase) {
                return;
            }
            phase = phase.next();
        }
        warn!(?phase, "every phase completed on entry; deferring entry to next tick");
        self.current = Some(phase);
        self.entry_deferred = true;
    }

    fn check_outcome(&mut self, battle: &mut Battle) {
        if self.outcome.is_some() {
            return;
        }
        if let Some(outcome) = battle.outcome() {
            info!(?outcome, turn = self.turn, "battle over");
            self.outcome = Some(outcome);
            battle.board.publish(GameEvent::GameOver(outcome));
        }
    }
}
