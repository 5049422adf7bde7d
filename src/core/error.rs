//! Error types.
//!
//! Every expected domain condition is reported as a `Result` whose error
//! `Display` text doubles as the human-readable reason shown to players.
//! Only `BoardError` signals a wiring bug; everything else is routine.

use super::ids::{CardHandle, SlotId};
use super::side::Side;
use crate::zones::ZoneKind;

/// Board construction failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("zone {kind:?} for {side} is declared twice")]
    DuplicateZone { kind: ZoneKind, side: Side },

    #[error("layout declares {0} slots, more than a board can address")]
    TooManySlots(usize),
}

/// Reasons a spawn request was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("invalid card definition: {0}")]
    InvalidCard(String),

    #[error("no {kind:?} zone for {side}")]
    ZoneNotFound { kind: ZoneKind, side: Side },

    #[error("slot index {index} is out of range (zone has {capacity} slots)")]
    SlotOutOfRange { index: usize, capacity: usize },

    #[error("slot {index} is already occupied")]
    SlotOccupied { index: usize },

    #[error("{kind:?} zone for {side} is full")]
    ZoneFull { kind: ZoneKind, side: Side },
}

/// Reasons a move was refused.
///
/// Covers both malformed requests and rule denials; in either case the
/// board is untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveDenial {
    #[error("card {0} is not on the board")]
    UnknownCard(CardHandle),

    #[error("slot {0} does not exist")]
    UnknownSlot(SlotId),

    #[error("source and destination are the same slot")]
    SameSlot,

    #[error("card {card} is not in slot {slot}")]
    NotAtSource { card: CardHandle, slot: SlotId },

    #[error("destination belongs to the other side")]
    DestinationNotOwned,

    #[error("source belongs to the other side")]
    SourceNotOwned,

    #[error("destination is not the next slot in the lane")]
    NotNextSlot,

    #[error("destination is occupied")]
    DestinationOccupied,

    #[error("no rule allows this move")]
    NoRuleAllows,

    #[error("{0}")]
    Denied(String),
}

/// Reasons a draw failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DrawError {
    #[error("{0}'s deck is empty")]
    DeckEmpty(Side),

    #[error("{0}'s hand is full")]
    HandFull(Side),

    #[error("{0} has no hand zone")]
    NoHandZone(Side),
}

/// Failures inside one effect step.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("no valid targets")]
    NoValidTargets,

    #[error("needed {required} targets, got {found}")]
    NotEnoughTargets { required: usize, found: usize },

    #[error("manual targeting requested but no selection handler is installed")]
    NoSelectionHandler,

    #[error("target selection was cancelled")]
    SelectionCancelled,

    #[error("effect has no source card")]
    MissingSource,

    #[error("whiteboard key {0:?} holds no targets")]
    MissingWhiteboardTargets(String),

    #[error("{action} failed on every target")]
    AllTargetsFailed { action: &'static str },

    #[error("{0}")]
    Draw(#[from] DrawError),
}
