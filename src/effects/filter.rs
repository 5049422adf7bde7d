//! Target filters.
//!
//! A step's filters are AND-combined: a candidate is valid only if every
//! filter accepts it. A filter that does not make sense for a target kind
//! (a stat check on a slot, say) rejects it.

use serde::{Deserialize, Serialize};

use super::context::EffectContext;
use super::targeting::Target;
use crate::cards::{CardInstance, CardType, Stat};
use crate::core::Side;
use crate::zones::ZoneKind;

/// A condition on a candidate target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    // === Ownership ===

    /// Belongs to the effect's owner.
    Friendly,
    /// Belongs to the owner's opponent.
    Hostile,

    // === Cards ===

    /// Card of the given type.
    CardType(CardType),
    /// Anything but the effect's source card.
    NotSource,
    /// Card or slot in a zone of this kind.
    InZone(ZoneKind),
    /// Card or player below its base health.
    Damaged,
    /// Current stat at most `value`. Players only answer for health.
    StatAtMost { stat: Stat, value: i64 },
    /// Current stat at least `value`. Players only answer for health.
    StatAtLeast { stat: Stat, value: i64 },

    // === Slots ===

    EmptySlot,
    OccupiedSlot,
}

impl TargetFilter {
    /// Whether `target` passes this filter.
    #[must_use]
    pub fn matches(&self, target: &Target, ctx: &EffectContext<'_>) -> bool {
        match self {
            TargetFilter::Friendly => owner_of(target, ctx) == Some(ctx.owner),
            TargetFilter::Hostile => owner_of(target, ctx) == Some(ctx.owner.opponent()),
            TargetFilter::CardType(card_type) => card(target, ctx).is_some_and(|c| c.card_type() == *card_type),
            TargetFilter::NotSource => match (target, ctx.source) {
                (Target::Card(handle), Some(source)) => *handle != source,
                _ => true,
            },
            TargetFilter::InZone(kind) => zone_kind_of(target, ctx) == Some(*kind),
            TargetFilter::Damaged => match target {
                Target::Card(_) => card(target, ctx).is_some_and(|c| c.is_damaged()),
                Target::Player(side) => ctx.players[*side].is_damaged(),
                Target::Slot(_) => false,
            },
            TargetFilter::StatAtMost { stat, value } => stat_of(target, *stat, ctx).is_some_and(|v| v <= *value),
            TargetFilter::StatAtLeast { stat, value } => stat_of(target, *stat, ctx).is_some_and(|v| v >= *value),
            TargetFilter::EmptySlot => match target {
                Target::Slot(slot) => ctx.board.slot(*slot).is_some_and(|s| s.is_empty()),
                _ => false,
            },
            TargetFilter::OccupiedSlot => match target {
                Target::Slot(slot) => ctx.board.slot(*slot).is_some_and(|s| !s.is_empty()),
                _ => false,
            },
        }
    }
}

fn card<'c>(target: &Target, ctx: &'c EffectContext<'_>) -> Option<&'c CardInstance> {
    target.as_card().and_then(|handle| ctx.board.card(handle))
}

fn owner_of(target: &Target, ctx: &EffectContext<'_>) -> Option<Side> {
    match target {
        Target::Card(_) => card(target, ctx).map(|c| c.side),
        Target::Slot(slot) => ctx.board.zone_of(*slot).map(|z| z.side()),
        Target::Player(side) => Some(*side),
    }
}

fn zone_kind_of(target: &Target, ctx: &EffectContext<'_>) -> Option<ZoneKind> {
    let slot = match target {
        Target::Card(_) => card(target, ctx)?.slot?,
        Target::Slot(slot) => *slot,
        Target::Player(_) => return None,
    };
    ctx.board.zone_of(slot).map(|z| z.kind())
}

fn stat_of(target: &Target, stat: Stat, ctx: &EffectContext<'_>) -> Option<i64> {
    match target {
        Target::Card(_) => card(target, ctx).map(|c| c.stat(stat)),
        Target::Player(side) if stat == Stat::Health => Some(ctx.players[*side].health),
        _ => None,
    }
}
