//! Battle construction.

use tracing::warn;

use super::{Battle, PlayerState};
use crate::board::Board;
use crate::cards::Deck;
use crate::core::{BoardError, BoardLayout, EngineConfig, GameRng, Side, SideMap};
use crate::rules::ManaPool;

/// Builder for a `Battle`.
///
/// ## Example
///
/// ```
/// use lane_ccg::battle::BattleBuilder;
/// use lane_ccg::core::{EngineConfig, Side};
///
/// let battle = BattleBuilder::new()
///     .config(EngineConfig::instant())
///     .starting_mana(3)
///     .build(42)
///     .unwrap();
///
/// assert_eq!(battle.player(Side::Enemy).health, 20);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BattleBuilder {
    config: EngineConfig,
    layout: Option<BoardLayout>,
    decks: SideMap<Deck>,
    shuffle: bool,
    starting_hand: usize,
    starting_mana: Option<i64>,
}

impl BattleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom layout instead of `BoardLayout::standard`.
    pub fn layout(mut self, layout: BoardLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn deck(mut self, side: Side, deck: Deck) -> Self {
        self.decks[side] = deck;
        self
    }

    /// Shuffle both decks with the battle's seed before drawing.
    pub fn shuffle_decks(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Cards each side draws before the first turn.
    pub fn starting_hand(mut self, count: usize) -> Self {
        self.starting_hand = count;
        self
    }

    /// Install a `ManaPool` with this much mana per side.
    pub fn starting_mana(mut self, mana: i64) -> Self {
        self.starting_mana = Some(mana);
        self
    }

    /// Build the battle. Fails only if the layout cannot be wired.
    pub fn build(self, seed: u64) -> Result<Battle, BoardError> {
        let layout = self
            .layout
            .unwrap_or_else(|| BoardLayout::standard(&self.config));
        let mut board = Board::new(&layout)?;
        if let Some(mana) = self.starting_mana {
            board.set_mana_ledger(Box::new(ManaPool::new(mana)));
        }

        let rng = GameRng::new(seed);
        let mut decks = self.decks;
        if self.shuffle {
            for (side, deck) in decks.iter_mut() {
                let mut deck_rng = rng.for_context(&format!("deck-{side}"));
                deck.shuffle(&mut deck_rng);
            }
        }

        let health = self.config.starting_health;
        let [player_deck, enemy_deck] = decks.into_array();
        let players = SideMap::from_pair(
            PlayerState::new(Side::Player, health).with_deck(player_deck),
            PlayerState::new(Side::Enemy, health).with_deck(enemy_deck),
        );

        let mut battle = Battle {
            board,
            players,
            rng,
            config: self.config,
        };

        for side in Side::ALL {
            for _ in 0..self.starting_hand {
                if let Err(err) = battle.draw(side) {
                    warn!(%side, %err, "starting hand short");
                    break;
                }
            }
        }
        battle.board.drain_events();

        Ok(battle)
    }
}
