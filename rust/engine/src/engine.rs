use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::Round;

/// Session-scoped round factory.
///
/// Every round gets a fresh 52-card deck whose shuffle seed is drawn from the
/// engine's own RNG, so one engine seed reproduces a whole session.
///
/// # Examples
///
/// ```
/// use blackjack_engine::engine::Engine;
///
/// let mut a = Engine::new(Some(42));
/// let mut b = Engine::new(Some(42));
/// let (ra, rb) = (a.start_round().unwrap(), b.start_round().unwrap());
/// assert_eq!(ra.player(), rb.player());
/// assert_eq!(ra.dealer(), rb.dealer());
/// ```
#[derive(Debug)]
pub struct Engine {
    rng: ChaCha20Rng,
    seed: u64,
}

impl Engine {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A freshly built and shuffled deck for the next round.
    pub fn next_deck(&mut self) -> Deck {
        let mut deck = Deck::new_with_seed(self.rng.next_u64());
        deck.shuffle();
        deck
    }

    pub fn start_round(&mut self) -> Result<Round, GameError> {
        let deck = self.next_deck();
        tracing::debug!(deck_seed = deck.seed(), "starting round");
        Round::start(deck)
    }
}
