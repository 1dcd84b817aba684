use blackjack_engine::cards::{Card, Rank as R, Suit as S};
use blackjack_engine::hand::{hand_value, is_blackjack, Hand};

fn c(r: R, s: S) -> Card {
    Card::new(r, s)
}

#[test]
fn ten_and_ace_is_21() {
    assert_eq!(hand_value(&[c(R::Ten, S::Spades), c(R::Ace, S::Hearts)]), 21);
}

#[test]
fn two_aces_are_12() {
    assert_eq!(hand_value(&[c(R::Ace, S::Spades), c(R::Ace, S::Hearts)]), 12);
}

#[test]
fn two_aces_and_nine_are_21() {
    let cards = [
        c(R::Ace, S::Spades),
        c(R::Ace, S::Hearts),
        c(R::Nine, S::Diamonds),
    ];
    assert_eq!(hand_value(&cards), 21);
}

#[test]
fn bust_value_is_still_reported() {
    let cards = [
        c(R::King, S::Spades),
        c(R::Queen, S::Hearts),
        c(R::Five, S::Diamonds),
    ];
    assert_eq!(hand_value(&cards), 25);
    assert!(Hand::from_cards(cards).is_bust());
}

#[test]
fn three_sevens_are_21_but_not_blackjack() {
    let cards = [
        c(R::Seven, S::Spades),
        c(R::Seven, S::Hearts),
        c(R::Seven, S::Diamonds),
    ];
    assert_eq!(hand_value(&cards), 21);
    assert!(!is_blackjack(&cards));
}

#[test]
fn ace_king_is_blackjack() {
    assert!(is_blackjack(&[c(R::Ace, S::Spades), c(R::King, S::Hearts)]));
    assert!(!is_blackjack(&[c(R::Ace, S::Spades), c(R::Nine, S::Hearts)]));
}

#[test]
fn ace_drops_to_one_when_eleven_would_bust() {
    let mut hand = Hand::from_cards([c(R::Ace, S::Clubs), c(R::Six, S::Clubs)]);
    assert_eq!(hand.value(), 17);
    assert!(hand.is_soft());
    hand.push(c(R::Eight, S::Diamonds));
    assert_eq!(hand.value(), 15);
    assert!(!hand.is_soft());
}

#[test]
fn hands_only_grow() {
    let mut hand = Hand::new();
    let dealt = [
        c(R::Two, S::Clubs),
        c(R::Jack, S::Hearts),
        c(R::Ace, S::Spades),
    ];
    for (i, card) in dealt.iter().enumerate() {
        hand.push(*card);
        assert_eq!(hand.len(), i + 1);
        assert_eq!(&hand.cards()[..=i], &dealt[..=i]);
    }
    assert_eq!(hand.value(), 13);
}
