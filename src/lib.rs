//! # lane-ccg
//!
//! Rules engine for a turn-based lane-combat card game.
//!
//! ## Design Principles
//!
//! 1. **Validate, then commit**: every state change is checked in full
//!    before anything mutates. A rejected request leaves the board as it
//!    was and publishes nothing.
//!
//! 2. **Compute, then apply**: combat resolution returns a `CombatResult`
//!    and changes no health. The caller applies it when it chooses.
//!
//! 3. **Closed-world legality**: a player or effect move needs at least
//!    one play rule that allows it and none that deny it.
//!
//! ## Architecture
//!
//! - **Arena storage**: the `Board` owns zones, slots and card instances in
//!   flat collections; slots and cards refer to each other by handle.
//!
//! - **Event outbox**: the core never calls presentation code. It queues
//!   `GameEvent`s that the host drains with `Board::drain_events`.
//!
//! - **Cooperative time**: the phase machine moves only when the host calls
//!   `PhaseManager::tick` or one of its transition methods.
//!
//! ## Modules
//!
//! - `core`: ids, sides, configuration, errors, events, RNG
//! - `cards`: definitions, instances, registry, decks
//! - `zones`: zones and slots
//! - `board`: positional state, spawning, movement, lane advancement
//! - `rules`: move legality, play rules, mana ledger
//! - `combat`: lane topology, targeting, combat rules and resolution
//! - `phases`: the turn state machine and input gating
//! - `effects`: step-sequenced effect resolution
//! - `battle`: the battle aggregate and its builder

pub mod battle;
pub mod board;
pub mod cards;
pub mod combat;
pub mod core;
pub mod effects;
pub mod phases;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    BoardError, BoardLayout, CardHandle, DrawError, EffectError, EngineConfig, EventQueue,
    GameEvent, GameRng, MoveDenial, Side, SideMap, SlotId, SpawnError, ZoneConfig, ZoneId,
};

pub use crate::zones::{Slot, Zone, ZoneKind};

pub use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry, CardType, Deck, Stat};

pub use crate::board::Board;

pub use crate::rules::{ManaLedger, ManaPool, MoveKind, MoveRules, PlayRule, RuleVerdict};

pub use crate::combat::{CombatLane, CombatResult, CombatRule, CombatSystem, HitEvent, HitTarget};

pub use crate::phases::{GameOutcome, InputGate, PhaseHandler, PhaseManager, PhaseType};

pub use crate::effects::{
    BuffStat, DealDamage, Destroy, Draw, Effect, EffectContext, EffectOutcome, EffectResolver,
    EffectStep, Heal, ManualTargetHandler, SubEffect, Target, TargetCount, TargetFilter,
    TargetType, TargetingMode, WhiteboardValue,
};

pub use crate::battle::{Battle, BattleBuilder, PlayerState};
