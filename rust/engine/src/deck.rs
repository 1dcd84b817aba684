use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// An ordered stack of cards. Dealing pops from the end of `cards`, so the
/// last element is always the next card out.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    seed: Option<u64>,
    rng: ChaCha20Rng,
}

/// Builds a fresh 52-card deck in canonical order. Callers shuffle it before play.
pub fn create_deck() -> Deck {
    Deck::new_with_seed(rand::random())
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep canonical order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            seed: Some(seed),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Builds a rigged deck whose cards come out in exactly the given order.
    ///
    /// ```
    /// use blackjack_engine::cards::{Card, Rank, Suit};
    /// use blackjack_engine::deck::Deck;
    ///
    /// let mut deck = Deck::from_deal_order(vec![
    ///     Card::new(Rank::Ace, Suit::Spades),
    ///     Card::new(Rank::King, Suit::Hearts),
    /// ]);
    /// assert_eq!(deck.deal().unwrap(), Card::new(Rank::Ace, Suit::Spades));
    /// assert_eq!(deck.remaining(), 1);
    /// ```
    pub fn from_deal_order(order: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = order.into_iter().collect();
        cards.reverse();
        Self {
            cards,
            seed: None,
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    /// Uniformly permutes the remaining cards in place (Fisher-Yates).
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut self.rng);
    }

    pub fn deal(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyDeck)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Seed of the shuffle RNG, `None` for rigged decks.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Cards bottom to top; the last one is dealt next.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
