//! Play rules: per-card move-legality rules.
//!
//! Each rule looks at a move request and answers with a tri-state
//! `RuleVerdict`. The evaluator combines a card's rules closed-world:
//!
//! - any `Deny` stops evaluation immediately with that rule's reason
//! - `Allow` is remembered, but later rules may still deny
//! - `Ignore` means the rule does not apply
//!
//! A move is legal only if nothing denied it and at least one rule
//! allowed it. A card with no rules can never be moved by a player or
//! an effect.

use serde::{Deserialize, Serialize};

use super::mana::ManaLedger;
use super::move_rules::MoveKind;
use crate::cards::CardInstance;
use crate::core::MoveDenial;
use crate::zones::{Slot, Zone, ZoneKind};

/// Outcome of one rule for one move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleVerdict {
    Allow,
    Deny(String),
    Ignore,
}

/// Everything a rule may inspect about a proposed move.
#[derive(Clone, Copy, Debug)]
pub struct MoveRequest<'a> {
    pub card: &'a CardInstance,
    pub from: &'a Slot,
    pub to: &'a Slot,
    pub from_zone: &'a Zone,
    pub to_zone: &'a Zone,
    pub kind: MoveKind,
    pub mana: Option<&'a dyn ManaLedger>,
}

impl MoveRequest<'_> {
    fn leaves_hand(&self) -> bool {
        self.from_zone.is_hand() && !self.to_zone.is_hand()
    }
}

/// A move-legality rule attached to a card definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayRule {
    /// Allow moves from one zone kind to another.
    AllowFromTo { from: ZoneKind, to: ZoneKind },

    /// Allow any move into a zone kind.
    AllowToZone(ZoneKind),

    /// Allow a step to the source slot's next lane slot.
    AllowLaneStep,

    /// Deny any move into a zone kind.
    DenyToZone(ZoneKind),

    /// Deny moves onto an occupied board slot.
    RequireEmptyDestination,

    /// Deny moves made by any other authority.
    OnlyMoveKind(MoveKind),

    /// Deny playing from hand when the side cannot afford the card.
    /// Ignored when no mana ledger is installed.
    RequireMana,
}

impl PlayRule {
    /// Evaluate this rule against a move request.
    #[must_use]
    pub fn evaluate(&self, request: &MoveRequest<'_>) -> RuleVerdict {
        match self {
            PlayRule::AllowFromTo { from, to } => {
                if request.from_zone.kind() == *from && request.to_zone.kind() == *to {
                    RuleVerdict::Allow
                } else {
                    RuleVerdict::Ignore
                }
            }
            PlayRule::AllowToZone(kind) => {
                if request.to_zone.kind() == *kind {
                    RuleVerdict::Allow
                } else {
                    RuleVerdict::Ignore
                }
            }
            PlayRule::AllowLaneStep => {
                if request.from.next() == Some(request.to.id()) {
                    RuleVerdict::Allow
                } else {
                    RuleVerdict::Ignore
                }
            }
            PlayRule::DenyToZone(kind) => {
                if request.to_zone.kind() == *kind {
                    RuleVerdict::Deny(format!("{} cannot be moved to {:?}", request.card.name(), kind))
                } else {
                    RuleVerdict::Ignore
                }
            }
            PlayRule::RequireEmptyDestination => {
                if !request.to_zone.is_hand() && !request.to.is_empty() {
                    RuleVerdict::Deny("destination is occupied".to_string())
                } else {
                    RuleVerdict::Ignore
                }
            }
            PlayRule::OnlyMoveKind(kind) => {
                if request.kind != *kind {
                    RuleVerdict::Deny(format!("only {:?} moves may relocate {}", kind, request.card.name()))
                } else {
                    RuleVerdict::Ignore
                }
            }
            PlayRule::RequireMana => {
                let (Some(mana), true) = (request.mana, request.leaves_hand()) else {
                    return RuleVerdict::Ignore;
                };
                let cost = request.card.definition.mana_cost;
                let available = mana.available(request.card.side);
                if available < cost {
                    RuleVerdict::Deny(format!("not enough mana: need {}, have {}", cost, available))
                } else {
                    RuleVerdict::Ignore
                }
            }
        }
    }
}

/// Combine a card's rules for one move.
///
/// First `Deny` wins; otherwise at least one `Allow` is required.
pub fn evaluate_rules(rules: &[PlayRule], request: &MoveRequest<'_>) -> Result<(), MoveDenial> {
    let mut allowed = false;

    for rule in rules {
        match rule.evaluate(request) {
            RuleVerdict::Deny(reason) => return Err(MoveDenial::Denied(reason)),
            RuleVerdict::Allow => allowed = true,
            RuleVerdict::Ignore => {}
        }
    }

    if allowed {
        Ok(())
    } else {
        Err(MoveDenial::NoRuleAllows)
    }
}
