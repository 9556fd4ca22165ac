/*
Game: Monopoly (single-token landing frequencies)
BoardGameGeek: https://boardgamegeek.com/boardgame/1406/monopoly
*/

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::board::{
    BoardState, B_O_RAILROAD, BOARDWALK, ELECTRIC_COMPANY, GO, GO_TO_JAIL, ILLINOIS_AVENUE,
    JUST_VISITING, PENNSYLVANIA_RAILROAD, READING_RAILROAD, ST_CHARLES_PLACE, TOTAL_SPACES,
    WATER_WORKS,
};
use crate::deck::Deck;
use crate::rng::GameRng;
use crate::ConfigError;

pub const CARDS_IN_DECK: i32 = 16;

// Community chest is resolved before chance. The sets are disjoint on the
// standard board but the checking order is part of the contract.
static COMMUNITY_CHEST_SPACES: Lazy<HashSet<usize>> = Lazy::new(|| HashSet::from([2, 17, 33]));
static CHANCE_SPACES: Lazy<HashSet<usize>> = Lazy::new(|| HashSet::from([7, 22, 36]));

/// Which layers of the movement rules are active.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Ruleset {
    /// Dice movement only.
    Naive,
    /// Dice movement plus the three-doubles jail rule.
    ThreeDoubles,
    /// The jail rule plus chance and community chest cards.
    #[default]
    Realistic,
}

/// One layer of the movement rule chain. Layers wrap an inner rule and
/// delegate to it whenever their own effect does not apply.
pub trait MovementRule {
    /// Where the token ends up after rolling `roll1` and `roll2` from
    /// `old`. The card layer records an extra visitation on the board
    /// when a drawn card relocates the token off a card tile.
    fn next_position(
        &mut self,
        old: usize,
        roll1: i32,
        roll2: i32,
        board: &mut BoardState,
        rng: &mut GameRng,
    ) -> usize;

    /// A fresh trial is starting: clear per-trial movement state. Deck
    /// contents survive, like a table where the cards stay stacked
    /// between games.
    fn begin_trial(&mut self) {}
}

/// Movement by dice total alone.
pub struct NaiveMovement;

impl MovementRule for NaiveMovement {
    fn next_position(
        &mut self,
        old: usize,
        roll1: i32,
        roll2: i32,
        _board: &mut BoardState,
        _rng: &mut GameRng,
    ) -> usize {
        (old + (roll1 + roll2) as usize) % TOTAL_SPACES
    }
}

/// Three consecutive doubles send the token straight to Go To Jail,
/// bypassing the inner layers for that turn.
pub struct ThreeDoublesRule<M: MovementRule> {
    inner: M,
    doubles: i32,
}

impl<M: MovementRule> ThreeDoublesRule<M> {
    pub fn new(inner: M) -> ThreeDoublesRule<M> {
        ThreeDoublesRule { inner, doubles: 0 }
    }

    /// Consecutive doubles rolled so far.
    pub fn streak(&self) -> i32 {
        self.doubles
    }
}

impl<M: MovementRule> MovementRule for ThreeDoublesRule<M> {
    fn next_position(
        &mut self,
        old: usize,
        roll1: i32,
        roll2: i32,
        board: &mut BoardState,
        rng: &mut GameRng,
    ) -> usize {
        // A token standing on Go To Jail plays its next roll from Just
        // Visiting; the relocation was already counted when it happened.
        let old = if old == GO_TO_JAIL { JUST_VISITING } else { old };
        if roll1 == roll2 {
            self.doubles += 1;
            if self.doubles == 3 {
                self.doubles = 0;
                return GO_TO_JAIL;
            }
        } else {
            self.doubles = 0;
        }
        self.inner.next_position(old, roll1, roll2, board, rng)
    }

    fn begin_trial(&mut self) {
        self.doubles = 0;
        self.inner.begin_trial();
    }
}

/// Chance and community chest tiles draw a card that may relocate the
/// token. The card tile itself counts as landed on before the relocation.
pub struct CardRule<M: MovementRule> {
    inner: M,
    chance: Deck,
    community_chest: Deck,
}

impl<M: MovementRule> CardRule<M> {
    pub fn new(inner: M, n_cards: i32, rng: &mut GameRng) -> Result<CardRule<M>, ConfigError> {
        Ok(CardRule {
            inner,
            chance: Deck::new(n_cards, rng)?,
            community_chest: Deck::new(n_cards, rng)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_decks(inner: M, chance: Deck, community_chest: Deck) -> CardRule<M> {
        CardRule {
            inner,
            chance,
            community_chest,
        }
    }

    fn chance_target(&self, tile: usize, card: i32) -> usize {
        match card {
            0 => GO,
            1 => GO_TO_JAIL,
            2 => ST_CHARLES_PLACE,
            3 => ILLINOIS_AVENUE,
            4 => READING_RAILROAD,
            5 => BOARDWALK,
            // Go back three spaces
            6 => tile - 3,
            // Advance to the nearest utility
            7 => {
                if tile == 22 {
                    WATER_WORKS
                } else {
                    ELECTRIC_COMPANY
                }
            }
            // 8 and 9: advance to the nearest railroad
            _ => match tile {
                7 => PENNSYLVANIA_RAILROAD,
                22 => B_O_RAILROAD,
                _ => READING_RAILROAD,
            },
        }
    }
}

impl<M: MovementRule> MovementRule for CardRule<M> {
    fn next_position(
        &mut self,
        old: usize,
        roll1: i32,
        roll2: i32,
        board: &mut BoardState,
        rng: &mut GameRng,
    ) -> usize {
        let tile = self.inner.next_position(old, roll1, roll2, board, rng);
        if COMMUNITY_CHEST_SPACES.contains(&tile) {
            // Only two community chest cards move the token; the rest
            // touch money, which this model ignores.
            let card = self.community_chest.draw(rng);
            if card > 1 {
                return tile;
            }
            board.record_visit(tile);
            return if card == 0 { GO } else { GO_TO_JAIL };
        }
        if CHANCE_SPACES.contains(&tile) {
            // Ten of the chance cards move the token.
            let card = self.chance.draw(rng);
            if card > 9 {
                return tile;
            }
            board.record_visit(tile);
            return self.chance_target(tile, card);
        }
        tile
    }

    fn begin_trial(&mut self) {
        self.inner.begin_trial();
    }
}

/// Compose the rule chain for a ruleset. Both decks are shuffled from the
/// shared stream, so construction order matters for reproducibility.
pub fn build_ruleset(
    ruleset: Ruleset,
    rng: &mut GameRng,
) -> Result<Box<dyn MovementRule>, ConfigError> {
    Ok(match ruleset {
        Ruleset::Naive => Box::new(NaiveMovement),
        Ruleset::ThreeDoubles => Box::new(ThreeDoublesRule::new(NaiveMovement)),
        Ruleset::Realistic => Box::new(CardRule::new(
            ThreeDoublesRule::new(NaiveMovement),
            CARDS_IN_DECK,
            rng,
        )?),
    })
}
