use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The best possible total; anything above it is a bust.
pub const BLACKJACK: u32 = 21;

/// Best Blackjack total for `cards`.
///
/// Non-ace cards are summed into a base. With `a` aces, the value for `k`
/// aces counted as 11 is `base + 11k + (a - k)`; the largest `k` that stays
/// at or under 21 wins. If even `k = 0` busts, the hard total `base + a` is
/// returned and the hand is bust.
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::hand::hand_value;
///
/// let hand = [
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Ace, Suit::Hearts),
///     Card::new(Rank::Nine, Suit::Diamonds),
/// ];
/// assert_eq!(hand_value(&hand), 21);
/// ```
pub fn hand_value(cards: &[Card]) -> u32 {
    let (base, aces) = split_aces(cards);
    (0..=aces)
        .rev()
        .map(|k| base + 11 * k + (aces - k))
        .find(|&total| total <= BLACKJACK)
        .unwrap_or(base + aces)
}

/// A natural: exactly two cards worth 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == BLACKJACK
}

/// True when at least one ace is counted as 11 in the best total.
pub fn is_soft(cards: &[Card]) -> bool {
    let (base, aces) = split_aces(cards);
    aces > 0 && hand_value(cards) > base + aces
}

fn split_aces(cards: &[Card]) -> (u32, u32) {
    cards.iter().fold((0, 0), |(base, aces), c| {
        if c.rank.is_ace() {
            (base, aces + 1)
        } else {
            (base + c.rank.points(), aces)
        }
    })
}

/// Cards held by the player or the dealer. Append-only: a hand never
/// shrinks or reorders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn value(&self) -> u32 {
        hand_value(&self.cards)
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft(&self.cards)
    }
}
