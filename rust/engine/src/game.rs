use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::Hand;
use crate::player::PlayerAction;
use crate::rules::{self, Outcome};

/// Stage of a round. Rounds only ever move forward through these.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Deck is ready, no cards dealt yet
    Dealing,
    /// Both hands hold two cards; naturals not yet checked
    BlackjackCheck,
    /// Waiting on hit or stand
    PlayerTurn,
    /// Dealer is drawing
    DealerTurn,
    /// Outcome fixed; nothing may change anymore
    Resolved,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Dealing => "dealing",
            Phase::BlackjackCheck => "blackjack_check",
            Phase::PlayerTurn => "player_turn",
            Phase::DealerTurn => "dealer_turn",
            Phase::Resolved => "resolved",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a round reached [`Phase::Resolved`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Settled by the blackjack check right after the deal
    Naturals,
    /// Player went over 21; the dealer never played
    PlayerBust,
    /// Dealer played out and the hands were compared
    Showdown,
}

/// One round of Blackjack driven one step at a time by an adapter.
///
/// Owns its deck and both hands. Once resolved, every mutating call is
/// rejected with [`GameError::ActionNotAllowed`].
///
/// # Examples
///
/// ```
/// use blackjack_engine::cards::{Card, Rank, Suit};
/// use blackjack_engine::deck::Deck;
/// use blackjack_engine::game::{Phase, Round};
/// use blackjack_engine::rules::Outcome;
///
/// // player gets A♠ K♥, dealer 9♦ 7♣
/// let deck = Deck::from_deal_order(vec![
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Hearts),
///     Card::new(Rank::Nine, Suit::Diamonds),
///     Card::new(Rank::Seven, Suit::Clubs),
/// ]);
/// let round = Round::start(deck).unwrap();
/// assert_eq!(round.phase(), Phase::Resolved);
/// assert_eq!(round.outcome(), Some(Outcome::Blackjack));
/// ```
#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    player: Hand,
    dealer: Hand,
    phase: Phase,
    outcome: Option<Outcome>,
    resolution: Option<Resolution>,
    actions: Vec<PlayerAction>,
}

impl Round {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            player: Hand::new(),
            dealer: Hand::new(),
            phase: Phase::Dealing,
            outcome: None,
            resolution: None,
            actions: Vec::new(),
        }
    }

    /// Deals the opening hands and runs the blackjack check.
    pub fn start(deck: Deck) -> Result<Self, GameError> {
        let mut round = Self::new(deck);
        round.deal_initial()?;
        round.check_naturals()?;
        Ok(round)
    }

    /// Two cards to the player, then two to the dealer.
    pub fn deal_initial(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::Dealing)?;
        for _ in 0..2 {
            let card = self.deck.deal()?;
            self.player.push(card);
        }
        for _ in 0..2 {
            let card = self.deck.deal()?;
            self.dealer.push(card);
        }
        tracing::debug!(
            player = self.player.value(),
            dealer = self.dealer.value(),
            "opening hands dealt"
        );
        self.phase = Phase::BlackjackCheck;
        Ok(())
    }

    pub fn check_naturals(&mut self) -> Result<Phase, GameError> {
        self.expect_phase(Phase::BlackjackCheck)?;
        match rules::check_naturals(&self.player, &self.dealer) {
            Some(outcome) => self.resolve(outcome, Resolution::Naturals),
            None => self.phase = Phase::PlayerTurn,
        }
        Ok(self.phase)
    }

    /// Deals one card to the player. A bust resolves the round as a loss
    /// on the spot.
    pub fn hit(&mut self) -> Result<Card, GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        let card = self.deck.deal()?;
        self.player.push(card);
        self.actions.push(PlayerAction::Hit);
        tracing::debug!(card = %card, value = self.player.value(), "player hits");
        if self.player.is_bust() {
            self.resolve(Outcome::Lose, Resolution::PlayerBust);
        }
        Ok(card)
    }

    /// Ends the player's turn, plays the dealer out and compares hands.
    pub fn stand(&mut self) -> Result<Outcome, GameError> {
        self.expect_phase(Phase::PlayerTurn)?;
        self.actions.push(PlayerAction::Stand);
        self.phase = Phase::DealerTurn;
        rules::dealer_policy(&mut self.deck, &mut self.dealer)?;
        let outcome = rules::compare(&self.player, &self.dealer);
        self.resolve(outcome, Resolution::Showdown);
        Ok(outcome)
    }

    pub fn apply(&mut self, action: PlayerAction) -> Result<Phase, GameError> {
        match action {
            PlayerAction::Hit => self.hit().map(|_| self.phase),
            PlayerAction::Stand => self.stand().map(|_| self.phase),
        }
    }

    fn resolve(&mut self, outcome: Outcome, resolution: Resolution) {
        self.phase = Phase::Resolved;
        self.outcome = Some(outcome);
        self.resolution = Some(resolution);
        tracing::debug!(
            outcome = %outcome,
            ?resolution,
            player = self.player.value(),
            dealer = self.dealer.value(),
            "round resolved"
        );
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::ActionNotAllowed { phase: self.phase })
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }
    pub fn is_resolved(&self) -> bool {
        self.phase == Phase::Resolved
    }
    pub fn player(&self) -> &Hand {
        &self.player
    }
    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }
    pub fn actions(&self) -> &[PlayerAction] {
        &self.actions
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
    pub fn seed(&self) -> Option<u64> {
        self.deck.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank as R, Suit as S};

    fn rigged(ranks: &[R]) -> Deck {
        Deck::from_deal_order(ranks.iter().map(|&r| Card::new(r, S::Hearts)))
    }

    #[test]
    fn deal_order_is_player_then_dealer() {
        let mut round = Round::new(rigged(&[R::Two, R::Three, R::Four, R::Five]));
        round.deal_initial().unwrap();
        assert_eq!(round.phase(), Phase::BlackjackCheck);
        assert_eq!(round.player().value(), 5);
        assert_eq!(round.dealer().value(), 9);
    }

    #[test]
    fn steps_out_of_order_are_rejected() {
        let mut round = Round::new(rigged(&[R::Two, R::Three, R::Four, R::Five]));
        assert_eq!(
            round.hit(),
            Err(GameError::ActionNotAllowed {
                phase: Phase::Dealing
            })
        );
        assert!(round.check_naturals().is_err());
    }

    #[test]
    fn stand_runs_dealer_and_compares() {
        // player 10+9, dealer 10+6 draws a 5
        let deck = rigged(&[R::Ten, R::Nine, R::Ten, R::Six, R::Five]);
        let mut round = Round::start(deck).unwrap();
        assert_eq!(round.phase(), Phase::PlayerTurn);
        assert_eq!(round.stand(), Ok(Outcome::Lose));
        assert_eq!(round.dealer().value(), 21);
        assert_eq!(round.resolution(), Some(Resolution::Showdown));
        assert_eq!(round.actions(), &[PlayerAction::Stand]);
    }

    #[test]
    fn apply_reports_new_phase() {
        let deck = rigged(&[R::Two, R::Three, R::Ten, R::Seven, R::Four]);
        let mut round = Round::start(deck).unwrap();
        assert_eq!(round.apply(PlayerAction::Hit), Ok(Phase::PlayerTurn));
        assert_eq!(round.player().value(), 9);
        assert_eq!(round.apply(PlayerAction::Stand), Ok(Phase::Resolved));
    }

    #[test]
    fn phase_displays_snake_case() {
        assert_eq!(Phase::PlayerTurn.to_string(), "player_turn");
        assert_eq!(
            GameError::ActionNotAllowed {
                phase: Phase::Resolved
            }
            .to_string(),
            "action not allowed during resolved"
        );
    }
}
