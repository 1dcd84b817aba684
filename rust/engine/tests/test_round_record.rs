use blackjack_engine::cards::{Card, Rank as R, Suit as S};
use blackjack_engine::deck::Deck;
use blackjack_engine::engine::Engine;
use blackjack_engine::errors::GameError;
use blackjack_engine::game::{Resolution, Round};
use blackjack_engine::player::PlayerAction;
use blackjack_engine::record::{RoundCounter, RoundRecord};
use blackjack_engine::rules::Outcome;

#[test]
fn unresolved_round_has_no_record() {
    let deck = Deck::from_deal_order(
        [R::Ten, R::Two, R::Ten, R::Seven]
            .into_iter()
            .map(|r| Card::new(r, S::Clubs)),
    );
    let round = Round::start(deck).unwrap();
    assert_eq!(
        RoundRecord::from_round("x", &round).unwrap_err(),
        GameError::RoundInProgress
    );
}

#[test]
fn record_captures_hands_actions_and_outcome() {
    let deck = Deck::from_deal_order(
        [R::Ten, R::Two, R::Ten, R::Seven, R::Six]
            .into_iter()
            .map(|r| Card::new(r, S::Hearts)),
    );
    let mut round = Round::start(deck).unwrap();
    round.hit().unwrap();
    round.stand().unwrap();

    let mut counter = RoundCounter::new();
    let id = counter.next_id();
    let rec = RoundRecord::from_round(id.clone(), &round).unwrap();
    assert_eq!(rec.round_id, id);
    assert_eq!(rec.seed, None);
    assert_eq!(rec.player_value, 18);
    assert_eq!(rec.dealer_value, 17);
    assert_eq!(rec.actions, vec![PlayerAction::Hit, PlayerAction::Stand]);
    assert_eq!(rec.outcome, Outcome::Win);
    assert_eq!(rec.resolution, Resolution::Showdown);
    assert!(rec.ts.as_deref().is_some_and(|ts| ts.ends_with('Z')));
}

#[test]
fn record_json_uses_lowercase_enums() {
    let mut engine = Engine::new(Some(8));
    let mut round = engine.start_round().unwrap();
    if !round.is_resolved() {
        round.stand().unwrap();
    }
    let rec = RoundRecord::from_round("20250101-000001", &round).unwrap();
    let json = rec.to_json().unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["round_id"], "20250101-000001");
    assert!(v["seed"].is_u64());
    let outcome = v["outcome"].as_str().unwrap();
    assert!(["win", "lose", "push", "blackjack"].contains(&outcome));

    let back: RoundRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rec);
}
