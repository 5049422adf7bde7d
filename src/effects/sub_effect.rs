//! Atomic actions a step performs on its targets.
//!
//! Multi-target semantics are shared by every built-in: each target is
//! tried independently, and the action fails only when it had targets and
//! none of them took. An empty target list is a successful no-op.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use super::context::EffectContext;
use super::targeting::Target;
use super::whiteboard::WhiteboardValue;
use crate::cards::Stat;
use crate::core::{EffectError, Side};

/// One atomic action.
///
/// Implementations may write results to the whiteboard and may cancel
/// the whole resolution through `EffectContext::cancel`.
pub trait SubEffect: Debug {
    /// Short verb used in logs and errors.
    fn name(&self) -> &'static str;

    fn execute(&self, ctx: &mut EffectContext<'_>, targets: &[Target]) -> Result<(), EffectError>;
}

fn finish(action: &'static str, targets: &[Target], succeeded: usize) -> Result<(), EffectError> {
    if !targets.is_empty() && succeeded == 0 {
        return Err(EffectError::AllTargetsFailed { action });
    }
    Ok(())
}

fn record(ctx: &mut EffectContext<'_>, key: &Option<String>, value: WhiteboardValue) {
    if let Some(key) = key {
        ctx.whiteboard.set(key.clone(), value);
    }
}

/// Subtract health from cards or players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealDamage {
    pub amount: i64,
    /// Whiteboard key for the total damage dealt.
    pub result_key: Option<String>,
}

impl DealDamage {
    #[must_use]
    pub fn new(amount: i64) -> Self {
        Self { amount, result_key: None }
    }

    #[must_use]
    pub fn store_total(mut self, key: impl Into<String>) -> Self {
        self.result_key = Some(key.into());
        self
    }
}

impl SubEffect for DealDamage {
    fn name(&self) -> &'static str {
        "deal damage"
    }

    fn execute(&self, ctx: &mut EffectContext<'_>, targets: &[Target]) -> Result<(), EffectError> {
        if self.amount <= 0 {
            record(ctx, &self.result_key, WhiteboardValue::Int(0));
            return Ok(());
        }

        let mut total = 0;
        let mut succeeded = 0;
        for target in targets {
            let dealt = match *target {
                Target::Card(handle) => ctx.board.card_mut(handle).map(|c| c.take_damage(self.amount)),
                Target::Player(side) => Some(ctx.players[side].take_damage(self.amount)),
                Target::Slot(_) => None,
            };
            if let Some(dealt) = dealt {
                total += dealt;
                succeeded += 1;
            }
        }

        debug!(total, targets = targets.len(), "damage dealt");
        record(ctx, &self.result_key, WhiteboardValue::Int(total));
        finish(self.name(), targets, succeeded)
    }
}

/// Add health to cards or players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heal {
    pub amount: i64,
    /// Whiteboard key for the total healed.
    pub result_key: Option<String>,
}

impl Heal {
    #[must_use]
    pub fn new(amount: i64) -> Self {
        Self { amount, result_key: None }
    }

    #[must_use]
    pub fn store_total(mut self, key: impl Into<String>) -> Self {
        self.result_key = Some(key.into());
        self
    }
}

impl SubEffect for Heal {
    fn name(&self) -> &'static str {
        "heal"
    }

    fn execute(&self, ctx: &mut EffectContext<'_>, targets: &[Target]) -> Result<(), EffectError> {
        if self.amount <= 0 {
            record(ctx, &self.result_key, WhiteboardValue::Int(0));
            return Ok(());
        }

        let mut total = 0;
        let mut succeeded = 0;
        for target in targets {
            let healed = match *target {
                Target::Card(handle) => ctx.board.card_mut(handle).map(|c| c.heal(self.amount)),
                Target::Player(side) => Some(ctx.players[side].heal(self.amount)),
                Target::Slot(_) => None,
            };
            if let Some(healed) = healed {
                total += healed;
                succeeded += 1;
            }
        }

        record(ctx, &self.result_key, WhiteboardValue::Int(total));
        finish(self.name(), targets, succeeded)
    }
}

/// Remove cards from play regardless of health.
///
/// A slot target destroys its occupant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destroy {
    /// Whiteboard key for the destroyed cards.
    pub result_key: Option<String>,
}

impl Destroy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store_destroyed(mut self, key: impl Into<String>) -> Self {
        self.result_key = Some(key.into());
        self
    }
}

impl SubEffect for Destroy {
    fn name(&self) -> &'static str {
        "destroy"
    }

    fn execute(&self, ctx: &mut EffectContext<'_>, targets: &[Target]) -> Result<(), EffectError> {
        let mut destroyed = Vec::new();
        for target in targets {
            let handle = match *target {
                Target::Card(handle) => Some(handle),
                Target::Slot(slot) => ctx.board.slot(slot).and_then(|s| s.occupant()),
                Target::Player(_) => None,
            };
            if let Some(card) = handle.and_then(|h| ctx.board.destroy_card(h)) {
                destroyed.push(Target::Card(card.handle));
            }
        }

        let succeeded = destroyed.len();
        record(ctx, &self.result_key, WhiteboardValue::Targets(destroyed));
        finish(self.name(), targets, succeeded)
    }
}

/// Draw cards from a side's deck into its hand.
///
/// Player targets name the sides that draw; with no targets the effect's
/// owner draws. Drawing stops early for a side when its deck runs out or
/// its hand fills.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub count: usize,
    /// Whiteboard key for the drawn cards.
    pub result_key: Option<String>,
}

impl Draw {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { count, result_key: None }
    }

    #[must_use]
    pub fn store_drawn(mut self, key: impl Into<String>) -> Self {
        self.result_key = Some(key.into());
        self
    }
}

impl SubEffect for Draw {
    fn name(&self) -> &'static str {
        "draw"
    }

    fn execute(&self, ctx: &mut EffectContext<'_>, targets: &[Target]) -> Result<(), EffectError> {
        let sides: SmallVec<[Side; 2]> = if targets.is_empty() {
            smallvec![ctx.owner]
        } else {
            targets
                .iter()
                .filter_map(|t| match t {
                    Target::Player(side) => Some(*side),
                    _ => None,
                })
                .collect()
        };
        if sides.is_empty() {
            return Err(EffectError::AllTargetsFailed { action: self.name() });
        }

        let mut drawn = Vec::new();
        let mut last_error = None;
        for side in sides {
            for _ in 0..self.count {
                let deck = &mut ctx.players[side].deck;
                match ctx.board.draw_into_hand(deck, side) {
                    Ok(handle) => drawn.push(Target::Card(handle)),
                    Err(err) => {
                        debug!(%side, %err, "draw stopped early");
                        last_error = Some(err);
                        break;
                    }
                }
            }
        }

        let any_drawn = !drawn.is_empty();
        record(ctx, &self.result_key, WhiteboardValue::Targets(drawn));
        match last_error {
            Some(err) if !any_drawn && self.count > 0 => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Add a signed delta to one stat of each target card.
///
/// Power and speed never drop below zero. A positive health buff leaves
/// health at least 1; a negative one is not clamped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffStat {
    pub stat: Stat,
    pub delta: i64,
}

impl BuffStat {
    #[must_use]
    pub fn new(stat: Stat, delta: i64) -> Self {
        Self { stat, delta }
    }
}

impl SubEffect for BuffStat {
    fn name(&self) -> &'static str {
        "buff"
    }

    fn execute(&self, ctx: &mut EffectContext<'_>, targets: &[Target]) -> Result<(), EffectError> {
        let mut succeeded = 0;
        for handle in targets.iter().filter_map(Target::as_card) {
            if let Some(card) = ctx.board.card_mut(handle) {
                card.buff(self.stat, self.delta);
                succeeded += 1;
            }
        }
        finish(self.name(), targets, succeeded)
    }
}
