//! Notifications published to the presentation layer.
//!
//! The core never calls into presentation code. It appends `GameEvent`s
//! to an outbox that the host drains once per frame. Events are only
//! published after a change has been committed, never for a rejected
//! request.

use serde::{Deserialize, Serialize};

use super::ids::{CardHandle, SlotId};
use crate::combat::CombatResult;
use crate::phases::{GameOutcome, PhaseType};

/// Something that happened in the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new card instance was placed into a slot.
    CardSpawned { card: CardHandle, slot: SlotId },

    /// A card moved between slots.
    CardMoved {
        card: CardHandle,
        from: SlotId,
        to: SlotId,
    },

    /// A card was removed from play.
    CardDestroyed {
        card: CardHandle,
        slot: Option<SlotId>,
    },

    /// A combat exchange was computed (not yet applied).
    CombatBegun(CombatResult),

    PhaseEntered(PhaseType),

    PhaseExited(PhaseType),

    /// A full draw-to-enemy-turn cycle finished.
    TurnCompleted(u32),

    /// One side ran out of health.
    GameOver(GameOutcome),
}

/// FIFO outbox of published events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: Vec<GameEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Peek at pending events without consuming them.
    #[must_use]
    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
