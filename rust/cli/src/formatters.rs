//! Card and hand formatters for terminal display.
//!
//! This module provides pure functions for formatting Blackjack hands for
//! terminal output. Cards print as rank immediately followed by suit
//! (`A♠`, `10♦`) with an ASCII letter fallback for terminals that cannot
//! render the suit symbols.
//!
//! ## Unicode vs ASCII Fallback
//!
//! [`SuitStyle::detect`] checks environment variables on Windows
//! (WT_SESSION, TERM_PROGRAM, VSCODE_INJECTION) and assumes Unicode support
//! on Unix-like systems.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::Hand;
//! use blackjack_cli::formatters::{format_hand_line, SuitStyle};
//!
//! let dealer = Hand::from_cards([
//!     Card::new(Rank::King, Suit::Spades),
//!     Card::new(Rank::Seven, Suit::Clubs),
//! ]);
//! assert_eq!(
//!     format_hand_line("Dealer", &dealer, true, SuitStyle::Unicode),
//!     "Dealer: ?? 7♣  (value: ?)"
//! );
//! ```

use blackjack_engine::cards::{Card, Suit};
use blackjack_engine::hand::Hand;

/// Placeholder printed in place of the dealer's hole card.
pub const HIDDEN_CARD: &str = "??";

/// Check if the terminal supports Unicode card symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitStyle {
    Unicode,
    Ascii,
}

impl SuitStyle {
    pub fn detect() -> Self {
        if supports_unicode() {
            SuitStyle::Unicode
        } else {
            SuitStyle::Ascii
        }
    }
}

pub fn format_suit(suit: Suit, style: SuitStyle) -> &'static str {
    match style {
        SuitStyle::Unicode => suit.symbol(),
        SuitStyle::Ascii => match suit {
            Suit::Hearts => "h",
            Suit::Diamonds => "d",
            Suit::Clubs => "c",
            Suit::Spades => "s",
        },
    }
}

pub fn format_card(card: &Card, style: SuitStyle) -> String {
    format!("{}{}", card.rank.symbol(), format_suit(card.suit, style))
}

/// Space-separated cards, with the first one masked when `hide_first` is set.
pub fn format_hand(cards: &[Card], hide_first: bool, style: SuitStyle) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, c)| {
            if hide_first && i == 0 {
                HIDDEN_CARD.to_string()
            } else {
                format_card(c, style)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One display line: `Player: A♠ K♥  (value: 21)`. A masked hand shows
/// `?` for its value.
pub fn format_hand_line(who: &str, hand: &Hand, hide_first: bool, style: SuitStyle) -> String {
    let value = if hide_first {
        "?".to_string()
    } else {
        hand.value().to_string()
    };
    format!(
        "{}: {}  (value: {})",
        who,
        format_hand(hand.cards(), hide_first, style),
        value
    )
}
