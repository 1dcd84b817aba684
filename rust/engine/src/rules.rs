use std::fmt;

use serde::{Deserialize, Serialize};

use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{Hand, BLACKJACK};

/// The dealer draws while below this total and stands on anything at or
/// above it, soft 17 included.
pub const DEALER_STANDS_ON: u32 = 17;

/// Result of a round from the player's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
    Push,
    /// Player natural against a dealer without one; conceptually pays 1.5x.
    Blackjack,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Push => "push",
            Outcome::Blackjack => "blackjack",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares two finished hands.
///
/// A player bust loses before the dealer's hand is even looked at, so a
/// double bust is still a loss. Never returns [`Outcome::Blackjack`]; naturals
/// are settled by [`check_naturals`] before any play happens.
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::Hand;
/// use blackjack_engine::rules::{compare, Outcome};
///
/// let player = Hand::from_cards([
///     Card::new(Rank::King, Suit::Spades),
///     Card::new(Rank::Queen, Suit::Hearts),
/// ]);
/// let dealer = Hand::from_cards([
///     Card::new(Rank::Ten, Suit::Clubs),
///     Card::new(Rank::Eight, Suit::Diamonds),
/// ]);
/// assert_eq!(compare(&player, &dealer), Outcome::Win);
/// ```
pub fn compare(player: &Hand, dealer: &Hand) -> Outcome {
    let player_value = player.value();
    if player_value > BLACKJACK {
        return Outcome::Lose;
    }
    let dealer_value = dealer.value();
    if dealer_value > BLACKJACK {
        return Outcome::Win;
    }
    match player_value.cmp(&dealer_value) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Less => Outcome::Lose,
        std::cmp::Ordering::Equal => Outcome::Push,
    }
}

/// Settles the opening deal when either side holds a natural.
///
/// Returns `None` when play should continue.
pub fn check_naturals(player: &Hand, dealer: &Hand) -> Option<Outcome> {
    match (player.is_blackjack(), dealer.is_blackjack()) {
        (true, true) => Some(Outcome::Push),
        (true, false) => Some(Outcome::Blackjack),
        (false, true) => Some(Outcome::Lose),
        (false, false) => None,
    }
}

/// Draws for the dealer until the hand reaches [`DEALER_STANDS_ON`].
///
/// The hand is scored with [`crate::hand::hand_value`] after every card and
/// the dealer stops the moment it reaches 17, even when that 17 is soft.
/// Returns how many cards were drawn.
pub fn dealer_policy(deck: &mut Deck, dealer: &mut Hand) -> Result<usize, GameError> {
    let mut drawn = 0;
    while dealer.value() < DEALER_STANDS_ON {
        let card = deck.deal()?;
        dealer.push(card);
        drawn += 1;
        tracing::debug!(card = %card, value = dealer.value(), "dealer draws");
    }
    Ok(drawn)
}
