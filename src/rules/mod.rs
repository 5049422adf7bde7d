//! Move legality and the collaborators it consults.
//!
//! - `MoveRules`: the fixed check order every move goes through
//! - `PlayRule`: per-card tri-state rules for player and effect moves
//! - `ManaLedger`: externally owned mana, consulted by `PlayRule::RequireMana`

mod mana;
mod move_rules;
mod play_rule;

pub use mana::{ManaLedger, ManaPool};
pub use move_rules::{MoveKind, MoveRules};
pub use play_rule::{evaluate_rules, MoveRequest, PlayRule, RuleVerdict};
