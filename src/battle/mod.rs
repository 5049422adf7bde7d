//! A battle: the board plus both sides' state.
//!
//! `Battle` is the aggregate the phase manager, the host and effects all
//! operate on. It holds no rules of its own beyond the mana debit that
//! follows a successful play from hand.

mod builder;
mod player;

use tracing::{debug, warn};

pub use builder::BattleBuilder;
pub use player::PlayerState;

use crate::board::Board;
use crate::cards::CardInstance;
use crate::combat::CombatResult;
use crate::core::{CardHandle, DrawError, EngineConfig, GameRng, MoveDenial, Side, SideMap, SlotId};
use crate::effects::EffectContext;
use crate::phases::GameOutcome;
use crate::rules::MoveKind;

/// Everything one lane battle needs.
#[derive(Debug)]
pub struct Battle {
    pub board: Board,
    pub players: SideMap<PlayerState>,
    pub rng: GameRng,
    pub config: EngineConfig,
}

impl Battle {
    #[must_use]
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side]
    }

    /// Draw the top of `side`'s deck into its hand.
    pub fn draw(&mut self, side: Side) -> Result<CardHandle, DrawError> {
        let deck = &mut self.players[side].deck;
        self.board.draw_into_hand(deck, side)
    }

    /// Player-initiated move of `card` to `to`.
    ///
    /// A card that leaves the hand for a board zone is paid for afterwards
    /// through the board's mana ledger, if one is installed. Affordability
    /// itself is a play rule's concern.
    pub fn play_card(&mut self, card: CardHandle, to: SlotId) -> Result<(), MoveDenial> {
        let instance = self.board.card(card).ok_or(MoveDenial::UnknownCard(card))?;
        let from = instance.slot.ok_or(MoveDenial::UnknownCard(card))?;
        let (side, cost) = (instance.side, instance.definition.mana_cost);
        let from_hand = self.board.zone_of(from).is_some_and(|z| z.is_hand());

        self.board.try_move_card(card, from, to, MoveKind::Player)?;

        let landed_on_board = self
            .board
            .card(card)
            .and_then(|c| c.slot)
            .and_then(|slot| self.board.zone_of(slot))
            .is_some_and(|z| !z.is_hand());

        if from_hand && landed_on_board {
            if let Some(ledger) = self.board.mana_ledger_mut() {
                if ledger.spend(side, cost) {
                    debug!(%card, %side, cost, "mana spent");
                } else {
                    warn!(%card, %side, cost, "card played without enough mana to pay");
                }
            }
        }
        Ok(())
    }

    /// Apply a combat result to this battle's board and players.
    pub fn apply_combat(&mut self, result: &CombatResult) {
        result.apply(&mut self.board, &mut self.players);
    }

    /// Set up an effect resolution on behalf of `owner`.
    pub fn effect_context(&mut self, source: Option<CardHandle>, owner: Side) -> EffectContext<'_> {
        EffectContext::new(source, owner, &mut self.board, &mut self.players, &mut self.rng)
    }

    /// Cards currently held in `side`'s hand.
    #[must_use]
    pub fn hand(&self, side: Side) -> Vec<&CardInstance> {
        self.board
            .cards_in_zone(crate::zones::ZoneKind::Hand, side)
            .into_iter()
            .filter_map(|handle| self.board.card(handle))
            .collect()
    }

    /// Winner, if either side is out of health.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        match (
            self.players[Side::Player].is_defeated(),
            self.players[Side::Enemy].is_defeated(),
        ) {
            (true, true) => Some(GameOutcome::Draw),
            (true, false) => Some(GameOutcome::EnemyWon),
            (false, true) => Some(GameOutcome::PlayerWon),
            (false, false) => None,
        }
    }
}
