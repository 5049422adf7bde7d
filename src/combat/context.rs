//! Combat accumulation.
//!
//! A `CombatContext` lives for one resolution. Rules record hits into it;
//! nothing on the board or on the players changes. When resolution ends
//! the context is frozen into a `CombatResult`, which is applied later as
//! a separate, explicit step.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::lane::CombatLane;
use crate::battle::PlayerState;
use crate::board::Board;
use crate::core::{CardHandle, Side, SideMap};

/// What a hit landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTarget {
    Card(CardHandle),
    Player(Side),
}

/// One discrete hit, in the order it was recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEvent {
    pub source: CardHandle,
    pub target: HitTarget,
    pub amount: i64,
}

/// Per-resolution accumulator.
pub struct CombatContext<'a> {
    board: &'a Board,
    lane: &'a CombatLane,
    players: &'a SideMap<PlayerState>,
    attacker: Side,
    player_damage: SideMap<i64>,
    card_damages: OrdMap<CardHandle, i64>,
    hits: Vec<HitEvent>,
}

impl<'a> CombatContext<'a> {
    pub fn new(
        board: &'a Board,
        lane: &'a CombatLane,
        players: &'a SideMap<PlayerState>,
        attacker: Side,
    ) -> Self {
        Self {
            board,
            lane,
            players,
            attacker,
            player_damage: SideMap::with_value(0),
            card_damages: OrdMap::new(),
            hits: Vec::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &'a Board {
        self.board
    }

    #[must_use]
    pub fn lane(&self) -> &'a CombatLane {
        self.lane
    }

    #[must_use]
    pub fn player(&self, side: Side) -> &'a PlayerState {
        &self.players[side]
    }

    /// The side acting in this resolution.
    #[must_use]
    pub fn attacker(&self) -> Side {
        self.attacker
    }

    /// Record damage dealt to a card.
    pub fn hit_card(&mut self, source: CardHandle, target: CardHandle, amount: i64) {
        *self.card_damages.entry(target).or_insert(0) += amount;
        self.hits.push(HitEvent {
            source,
            target: HitTarget::Card(target),
            amount,
        });
    }

    /// Record damage dealt directly to a side's player.
    pub fn hit_player(&mut self, source: CardHandle, side: Side, amount: i64) {
        self.player_damage[side] += amount;
        self.hits.push(HitEvent {
            source,
            target: HitTarget::Player(side),
            amount,
        });
    }

    /// Freeze the accumulated damage.
    #[must_use]
    pub fn into_result(self) -> CombatResult {
        CombatResult {
            damage_to_player: self.player_damage[Side::Player],
            damage_to_enemy: self.player_damage[Side::Enemy],
            card_damages: self.card_damages,
            hits: self.hits,
        }
    }
}

/// The outcome of one combat exchange.
///
/// `apply` is not idempotent: applying a result twice subtracts its
/// damage twice. Whoever holds the result applies it exactly once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    /// Damage to the `Player` side's health.
    pub damage_to_player: i64,

    /// Damage to the `Enemy` side's health.
    pub damage_to_enemy: i64,

    /// Total damage received per card.
    pub card_damages: OrdMap<CardHandle, i64>,

    /// Every hit in resolution order.
    pub hits: Vec<HitEvent>,
}

impl CombatResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Subtract the accumulated damage from players and cards.
    ///
    /// Cards that left the board since resolution are skipped. Defeated
    /// cards stay on the board; see `Board::clear_defeated`.
    pub fn apply(&self, board: &mut Board, players: &mut SideMap<PlayerState>) {
        players[Side::Player].health -= self.damage_to_player;
        players[Side::Enemy].health -= self.damage_to_enemy;

        for (&handle, &amount) in &self.card_damages {
            match board.card_mut(handle) {
                Some(card) => card.health -= amount,
                None => debug!(card = %handle, "damaged card left play before combat applied"),
            }
        }
    }
}
