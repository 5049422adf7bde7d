//! The state one effect resolution runs against.

use super::targeting::Target;
use super::whiteboard::Whiteboard;
use crate::battle::PlayerState;
use crate::board::Board;
use crate::core::{CardHandle, GameRng, Side, SideMap};

/// Identity, mutable game state and scratch space for one resolution.
pub struct EffectContext<'a> {
    /// Card whose effect is resolving, if any.
    pub source: Option<CardHandle>,

    /// Side the effect acts for.
    pub owner: Side,

    pub board: &'a mut Board,
    pub players: &'a mut SideMap<PlayerState>,
    pub rng: &'a mut GameRng,

    pub whiteboard: Whiteboard,

    /// Targets gathered for the step currently running.
    pub targets: Vec<Target>,

    cancelled: Option<String>,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        source: Option<CardHandle>,
        owner: Side,
        board: &'a mut Board,
        players: &'a mut SideMap<PlayerState>,
        rng: &'a mut GameRng,
    ) -> Self {
        Self {
            source,
            owner,
            board,
            players,
            rng,
            whiteboard: Whiteboard::new(),
            targets: Vec::new(),
            cancelled: None,
        }
    }

    /// Stop the resolution after the current step. Steps already run
    /// are not undone.
    pub fn cancel(&mut self, reason: impl Into<String>) {
        self.cancelled = Some(reason.into());
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.is_some()
    }

    #[must_use]
    pub fn cancel_reason(&self) -> Option<&str> {
        self.cancelled.as_deref()
    }
}
