use std::collections::HashSet;

use crate::domain::cards::parse_cards;
use crate::domain::dealing::deal;
use crate::domain::state::{Phase, Seat};
use crate::domain::test_state_helpers::session_with_hands;
use crate::domain::tricks::{legal_plays, play_card, trick_winner};
use crate::domain::{parse_card, Card, GameSession, Suit};
use crate::errors::domain::ValidationKind;

fn small_session() -> GameSession {
    session_with_hands([
        parse_cards(&["2♣", "5♥"]),
        parse_cards(&["9♣", "A♠"]),
        parse_cards(&["K♣", "Q♠"]),
        parse_cards(&["3♦", "J♦"]),
    ])
}

#[test]
fn legal_plays_restricts_to_led_suit_when_held() {
    let hand = parse_cards(&["2♣", "9♣", "A♥"]);
    let legal = legal_plays(&hand, Some(Suit::Clubs));
    assert_eq!(legal, parse_cards(&["2♣", "9♣"]));
}

#[test]
fn legal_plays_is_whole_hand_when_void_or_leading() {
    let hand = parse_cards(&["2♣", "9♣", "A♥"]);
    assert_eq!(legal_plays(&hand, Some(Suit::Diamonds)), hand);
    assert_eq!(legal_plays(&hand, None), hand);
}

#[test]
fn rejects_out_of_turn() {
    let mut session = small_session();
    let before = session.clone();
    let err = play_card(&mut session, 1, parse_card("9♣").unwrap()).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::OutOfTurn);
    assert_eq!(session.hands, before.hands);
    assert!(session.trick.is_empty());
    assert_eq!(session.turn, 0);
}

#[test]
fn rejects_card_not_in_hand() {
    let mut session = small_session();
    let err = play_card(&mut session, 0, parse_card("A♦").unwrap()).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::CardNotInHand);
    assert!(session.trick.is_empty());
}

#[test]
fn rejects_off_suit_when_led_suit_held() {
    let mut session = small_session();
    play_card(&mut session, 0, parse_card("2♣").unwrap()).unwrap();
    // Seat 1 holds 9♣ and must follow clubs.
    let err = play_card(&mut session, 1, parse_card("A♠").unwrap()).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::MustFollowSuit);
    assert_eq!(session.trick.len(), 1);
    assert_eq!(session.hands[1].len(), 2, "rejected play must not mutate");
}

#[test]
fn accepts_any_card_when_void_in_led_suit() {
    let mut session = small_session();
    play_card(&mut session, 0, parse_card("2♣").unwrap()).unwrap();
    play_card(&mut session, 1, parse_card("9♣").unwrap()).unwrap();
    play_card(&mut session, 2, parse_card("K♣").unwrap()).unwrap();
    // Seat 3 has no clubs; off-suit discard is legal.
    let result = play_card(&mut session, 3, parse_card("J♦").unwrap()).unwrap();
    assert_eq!(result.trick_winner, Some(2), "K♣ is the highest club");
}

#[test]
fn off_suit_card_never_wins() {
    let trick: Vec<(Seat, Card)> = vec![
        (0, parse_card("2♣").unwrap()),
        (1, parse_card("9♣").unwrap()),
        (2, parse_card("A♠").unwrap()),
        (3, parse_card("A♥").unwrap()),
    ];
    assert_eq!(trick_winner(&trick), 1, "aces off-suit cannot beat 9♣");
}

#[test]
fn winner_collects_trick_and_leads_next() {
    let mut session = small_session();
    play_card(&mut session, 0, parse_card("2♣").unwrap()).unwrap();
    play_card(&mut session, 1, parse_card("9♣").unwrap()).unwrap();
    play_card(&mut session, 2, parse_card("K♣").unwrap()).unwrap();
    let result = play_card(&mut session, 3, parse_card("3♦").unwrap()).unwrap();

    assert_eq!(result.trick_winner, Some(2));
    assert!(!result.round_completed);
    assert!(session.trick.is_empty());
    assert_eq!(session.turn, 2);
    assert_eq!(session.collected[2].len(), 4);
    let taken: HashSet<Card> = session.collected[2].iter().copied().collect();
    assert!(taken.contains(&parse_card("2♣").unwrap()));
    assert!(taken.contains(&parse_card("3♦").unwrap()));
}

#[test]
fn round_completes_when_hands_empty() {
    let mut session = small_session();
    // First trick, won by seat 2.
    play_card(&mut session, 0, parse_card("2♣").unwrap()).unwrap();
    play_card(&mut session, 1, parse_card("9♣").unwrap()).unwrap();
    play_card(&mut session, 2, parse_card("K♣").unwrap()).unwrap();
    play_card(&mut session, 3, parse_card("3♦").unwrap()).unwrap();
    // Last trick, led by the winner.
    play_card(&mut session, 2, parse_card("Q♠").unwrap()).unwrap();
    play_card(&mut session, 3, parse_card("J♦").unwrap()).unwrap();
    play_card(&mut session, 0, parse_card("5♥").unwrap()).unwrap();
    let result = play_card(&mut session, 1, parse_card("A♠").unwrap()).unwrap();

    assert_eq!(result.trick_winner, Some(1), "A♠ wins the spade lead");
    assert!(result.round_completed);
    assert_eq!(session.phase, Phase::RoundComplete);

    let mut err_session = session.clone();
    let err = play_card(&mut err_session, 1, parse_card("A♠").unwrap()).unwrap_err();
    assert_eq!(*err.kind(), ValidationKind::PhaseMismatch);
}

#[test]
fn full_dealt_round_collects_entire_deck() {
    let mut session = session_with_hands(deal(Some(2024)));
    let mut plays = 0;
    loop {
        let seat = session.turn;
        let legal = legal_plays(&session.hands[seat as usize], session.led_suit());
        let card = legal[0];
        let result = play_card(&mut session, seat, card).unwrap();
        plays += 1;
        if result.round_completed {
            break;
        }
        assert!(plays < 52, "round must complete within 52 plays");
    }
    assert_eq!(plays, 52);

    let all: Vec<Card> = session.collected.iter().flatten().copied().collect();
    assert_eq!(all.len(), 52);
    let set: HashSet<Card> = all.into_iter().collect();
    assert_eq!(set.len(), 52, "collections must partition the deck");
}
