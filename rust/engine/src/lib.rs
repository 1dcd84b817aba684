//! # blackjack-engine: Blackjack Rules Engine
//!
//! Single-player Blackjack against a dealer who stands on every 17.
//! Owns the deck, hand scoring, dealer policy and the round state machine;
//! front ends drive a [`game::Round`] one action at a time and render it.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Seeded deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hand scoring with soft/hard ace resolution
//! - [`rules`] - Outcome comparison, naturals check and dealer policy
//! - [`game`] - Round state machine
//! - [`engine`] - Per-session round factory
//! - [`record`] - In-memory round summaries and the round counter
//! - [`player`] - Player actions
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use blackjack_engine::engine::Engine;
//! use blackjack_engine::game::Phase;
//! use blackjack_engine::player::PlayerAction;
//!
//! let mut engine = Engine::new(Some(2024));
//! let mut round = engine.start_round().unwrap();
//! while round.phase() == Phase::PlayerTurn {
//!     let action = if round.player().value() < 17 {
//!         PlayerAction::Hit
//!     } else {
//!         PlayerAction::Stand
//!     };
//!     round.apply(action).unwrap();
//! }
//! assert!(round.outcome().is_some());
//! ```
//!
//! ## Scoring
//!
//! ```rust
//! use blackjack_engine::cards::{Card, Rank, Suit};
//! use blackjack_engine::hand::{hand_value, is_blackjack};
//!
//! let sevens = [
//!     Card::new(Rank::Seven, Suit::Spades),
//!     Card::new(Rank::Seven, Suit::Hearts),
//!     Card::new(Rank::Seven, Suit::Diamonds),
//! ];
//! assert_eq!(hand_value(&sevens), 21);
//! assert!(!is_blackjack(&sevens));
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod player;
pub mod record;
pub mod rules;
