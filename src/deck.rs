use crate::rng::GameRng;
use crate::ConfigError;

/// A shuffled stack of card identifiers `0..n_cards`, drawn without
/// replacement. The stack is rebuilt with a fresh shuffle immediately
/// after the draw that empties it, so a draw always removes exactly one
/// card from a non-empty deck and the deck is never observably empty.
#[derive(Debug, Clone)]
pub struct Deck {
    n_cards: i32,
    cards: Vec<i32>,
}

impl Deck {
    pub fn new(n_cards: i32, rng: &mut GameRng) -> Result<Deck, ConfigError> {
        if n_cards <= 0 {
            return Err(ConfigError::DeckSize(n_cards));
        }
        let cards = rng.permutation(n_cards as usize);
        Ok(Deck { n_cards, cards })
    }

    /// Take the top card. Consecutive full cycles are independent
    /// permutations, so over a long run every identifier appears with
    /// frequency `1 / n_cards`.
    pub fn draw(&mut self, rng: &mut GameRng) -> i32 {
        let card = self
            .cards
            .pop()
            .expect("deck is reshuffled before it can run dry");
        if self.cards.is_empty() {
            self.cards = rng.permutation(self.n_cards as usize);
        }
        card
    }

    /// Cards left in the current shuffle cycle.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Deck with a known draw order (last element drawn first), for
    /// scripted card scenarios.
    #[cfg(test)]
    pub(crate) fn stacked(n_cards: i32, cards: Vec<i32>) -> Deck {
        Deck { n_cards, cards }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_size() {
        let mut rng = GameRng::new(Some(1));
        assert_eq!(Deck::new(0, &mut rng).unwrap_err(), ConfigError::DeckSize(0));
        assert_eq!(
            Deck::new(-4, &mut rng).unwrap_err(),
            ConfigError::DeckSize(-4)
        );
    }

    #[test]
    fn each_card_appears_exactly_k_times_over_k_cycles() {
        let mut rng = GameRng::new(Some(11));
        let mut deck = Deck::new(16, &mut rng).unwrap();
        let mut counts = [0; 16];
        for _ in 0..3 * 16 {
            counts[deck.draw(&mut rng) as usize] += 1;
        }
        assert!(counts.iter().all(|&count| count == 3));
    }

    #[test]
    fn never_observably_empty() {
        let mut rng = GameRng::new(Some(5));
        let mut deck = Deck::new(4, &mut rng).unwrap();
        for _ in 0..40 {
            deck.draw(&mut rng);
            assert!(deck.remaining() > 0);
        }
    }

    #[test]
    fn single_card_deck_always_draws_the_same_card() {
        let mut rng = GameRng::new(Some(2));
        let mut deck = Deck::new(1, &mut rng).unwrap();
        for _ in 0..10 {
            assert_eq!(deck.draw(&mut rng), 0);
        }
    }

    #[test]
    fn same_seed_same_draw_sequence() {
        let mut rng_a = GameRng::new(Some(42));
        let mut rng_b = GameRng::new(Some(42));
        let mut deck_a = Deck::new(16, &mut rng_a).unwrap();
        let mut deck_b = Deck::new(16, &mut rng_b).unwrap();
        for _ in 0..50 {
            assert_eq!(deck_a.draw(&mut rng_a), deck_b.draw(&mut rng_b));
        }
    }
}
