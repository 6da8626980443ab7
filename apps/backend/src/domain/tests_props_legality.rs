//! Property-based tests for follow-suit legality.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::test_gens;
use crate::domain::tricks::legal_plays;
use crate::domain::Card;

proptest! {
    /// If a hand contains cards of the led suit, the legal set is exactly
    /// those cards.
    #[test]
    fn prop_follow_suit_legality(
        led_suit in test_gens::suit(),
        led_rank in test_gens::rank(),
        other_cards in test_gens::unique_cards_up_to(12),
    ) {
        let mut hand = vec![Card { suit: led_suit, rank: led_rank }];
        for card in other_cards {
            if card != hand[0] {
                hand.push(card);
            }
        }

        let legal = legal_plays(&hand, Some(led_suit));

        for card in &legal {
            prop_assert_eq!(card.suit, led_suit,
                "legal play {} must match the led suit", card);
        }
        let led_count = hand.iter().filter(|c| c.suit == led_suit).count();
        prop_assert_eq!(legal.len(), led_count);
    }

    /// A hand void in the led suit may play anything.
    #[test]
    fn prop_void_plays_anything((led_suit, hand) in test_gens::suit().prop_flat_map(|s| {
        (Just(s), test_gens::hand_without_suit(s))
    })) {
        let legal = legal_plays(&hand, Some(led_suit));
        prop_assert_eq!(legal, hand);
    }

    /// Legal plays are always a duplicate-free subset of the hand.
    #[test]
    fn prop_legal_plays_subset(
        hand in test_gens::hand(),
        led in proptest::option::of(test_gens::suit()),
    ) {
        let legal = legal_plays(&hand, led);

        let set: HashSet<Card> = legal.iter().copied().collect();
        prop_assert_eq!(set.len(), legal.len(), "no duplicates");
        for card in &legal {
            prop_assert!(hand.contains(card), "legal play {} must be in hand", card);
        }
        prop_assert!(!legal.is_empty(), "a non-empty hand always has a legal play");
    }
}
