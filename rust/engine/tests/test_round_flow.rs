use blackjack_engine::cards::{Card, Rank as R, Suit as S};
use blackjack_engine::deck::Deck;
use blackjack_engine::engine::Engine;
use blackjack_engine::errors::GameError;
use blackjack_engine::game::{Phase, Resolution, Round};
use blackjack_engine::player::PlayerAction;
use blackjack_engine::rules::Outcome;

fn rigged(cards: &[(R, S)]) -> Deck {
    Deck::from_deal_order(cards.iter().map(|&(r, s)| Card::new(r, s)))
}

#[test]
fn player_natural_resolves_before_anyone_acts() {
    let deck = rigged(&[
        (R::Ace, S::Spades),
        (R::King, S::Hearts),
        (R::Nine, S::Diamonds),
        (R::Seven, S::Clubs),
        (R::Five, S::Clubs),
    ]);
    let mut round = Round::start(deck).unwrap();
    assert_eq!(round.phase(), Phase::Resolved);
    assert_eq!(round.outcome(), Some(Outcome::Blackjack));
    assert_eq!(round.resolution(), Some(Resolution::Naturals));
    assert_eq!(round.dealer().len(), 2, "dealer must not draw");
    assert!(round.actions().is_empty(), "player must not act");
    assert_eq!(round.deck_remaining(), 1);
    assert_eq!(
        round.hit(),
        Err(GameError::ActionNotAllowed {
            phase: Phase::Resolved
        })
    );
}

#[test]
fn both_naturals_push_and_dealer_natural_loses() {
    let both = rigged(&[
        (R::Ace, S::Spades),
        (R::Queen, S::Hearts),
        (R::Ace, S::Clubs),
        (R::Jack, S::Clubs),
    ]);
    assert_eq!(Round::start(both).unwrap().outcome(), Some(Outcome::Push));

    let dealer_only = rigged(&[
        (R::Nine, S::Spades),
        (R::Queen, S::Hearts),
        (R::Ace, S::Clubs),
        (R::Ten, S::Clubs),
    ]);
    let round = Round::start(dealer_only).unwrap();
    assert_eq!(round.outcome(), Some(Outcome::Lose));
    assert_eq!(round.resolution(), Some(Resolution::Naturals));
}

#[test]
fn bust_ends_the_turn_without_consulting_the_dealer() {
    // player 10+2, hits 2 (14) then K (24); dealer 10+6 would bust on the 9
    let deck = rigged(&[
        (R::Ten, S::Spades),
        (R::Two, S::Hearts),
        (R::Ten, S::Clubs),
        (R::Six, S::Diamonds),
        (R::Two, S::Clubs),
        (R::King, S::Hearts),
        (R::Nine, S::Spades),
    ]);
    let mut round = Round::start(deck).unwrap();
    assert_eq!(round.player().value(), 12);

    round.hit().unwrap();
    assert_eq!(round.phase(), Phase::PlayerTurn);
    round.hit().unwrap();
    assert_eq!(round.player().value(), 24);
    assert_eq!(round.phase(), Phase::Resolved);
    assert_eq!(round.outcome(), Some(Outcome::Lose));
    assert_eq!(round.resolution(), Some(Resolution::PlayerBust));
    assert_eq!(round.dealer().len(), 2);
    assert_eq!(round.deck_remaining(), 1);

    assert!(round.hit().is_err(), "no hits after a bust");
    assert!(round.stand().is_err());
    assert_eq!(round.player().len(), 4);
}

#[test]
fn dealer_bust_after_stand_is_a_win() {
    let deck = rigged(&[
        (R::Ten, S::Spades),
        (R::Eight, S::Hearts),
        (R::Ten, S::Clubs),
        (R::Six, S::Diamonds),
        (R::Nine, S::Spades),
    ]);
    let mut round = Round::start(deck).unwrap();
    assert_eq!(round.apply(PlayerAction::Stand), Ok(Phase::Resolved));
    assert_eq!(round.outcome(), Some(Outcome::Win));
    assert_eq!(round.dealer().value(), 25);
    assert_eq!(round.resolution(), Some(Resolution::Showdown));
}

#[test]
fn seeded_engines_replay_the_same_session() {
    let mut a = Engine::new(Some(31337));
    let mut b = Engine::new(Some(31337));
    for _ in 0..20 {
        let mut ra = a.start_round().unwrap();
        let mut rb = b.start_round().unwrap();
        while ra.phase() == Phase::PlayerTurn {
            let action = if ra.player().value() < 15 {
                PlayerAction::Hit
            } else {
                PlayerAction::Stand
            };
            ra.apply(action).unwrap();
            rb.apply(action).unwrap();
        }
        assert_eq!(ra.outcome(), rb.outcome());
        assert_eq!(ra.dealer(), rb.dealer());
        assert!(ra.is_resolved());
    }
}

#[test]
fn resolved_rounds_always_carry_an_outcome() {
    let mut engine = Engine::new(Some(5));
    for _ in 0..200 {
        let mut round = engine.start_round().unwrap();
        while round.phase() == Phase::PlayerTurn {
            round.stand().unwrap();
        }
        assert_eq!(round.phase(), Phase::Resolved);
        assert!(round.outcome().is_some());
        assert!(round.dealer().value() >= 17 || round.resolution() == Some(Resolution::Naturals));
    }
}
