//! Property-based tests for trick-winner resolution.

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::tricks::trick_winner;
use crate::domain::{Card, Seat};

/// Oracle: linear scan for the highest card of the led suit.
fn oracle_winner(trick: &[(Seat, Card)]) -> Seat {
    let led = trick[0].1.suit;
    let mut best = trick[0];
    for &(seat, card) in &trick[1..] {
        if card.suit == led && card.rank > best.1.rank {
            best = (seat, card);
        }
    }
    best.0
}

proptest! {
    /// The winner holds the led suit and strictly the highest rank among
    /// same-suit plays; an off-suit card never wins.
    #[test]
    fn prop_winner_is_highest_of_led_suit(trick in test_gens::complete_trick()) {
        let winner = trick_winner(&trick);
        prop_assert_eq!(winner, oracle_winner(&trick));

        let led = trick[0].1.suit;
        let winning_card = trick
            .iter()
            .find(|&&(seat, _)| seat == winner)
            .map(|&(_, c)| c)
            .expect("winner played in this trick");
        prop_assert_eq!(winning_card.suit, led, "off-suit plays cannot win");
        for &(seat, card) in &trick {
            if card.suit == led && seat != winner {
                prop_assert!(card.rank < winning_card.rank);
            }
        }
    }

    /// The leader wins any trick where everyone else discarded off-suit.
    #[test]
    fn prop_leader_wins_all_offsuit_trick(
        leader in test_gens::seat(),
        cards in test_gens::unique_cards(4),
    ) {
        let led = cards[0].suit;
        prop_assume!(cards[1..].iter().all(|c| c.suit != led));
        let trick: Vec<(Seat, Card)> = cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| ((leader + i as Seat) % 4, card))
            .collect();
        prop_assert_eq!(trick_winner(&trick), leader);
    }
}
