// Proptest generators for domain types.
// Generators keep cards unique so hands and tricks stay deck-consistent.

use proptest::prelude::*;
use rand::Rng;

use crate::domain::state::Seat;
use crate::domain::{full_deck, Card, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Clubs),
        Just(Suit::Diamonds),
        Just(Suit::Hearts),
        Just(Suit::Spades),
    ]
}

pub fn rank() -> impl Strategy<Value = Rank> {
    proptest::sample::select(Rank::ALL.to_vec())
}

/// Generate a vector of N unique cards by shuffling the full deck.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut deck = full_deck();
        for i in 0..count.min(deck.len()) {
            let j = rng.random_range(i..deck.len());
            deck.swap(i, j);
        }
        deck.truncate(count);
        deck
    })
}

/// Generate a vector of 1 to max_count unique cards.
pub fn unique_cards_up_to(max_count: usize) -> impl Strategy<Value = Vec<Card>> {
    (1..=max_count).prop_flat_map(unique_cards)
}

/// Generate a hand (1-13 unique cards).
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    unique_cards_up_to(13)
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..=3u8
}

/// Generate a hand containing no cards of the given suit.
pub fn hand_without_suit(excluded: Suit) -> impl Strategy<Value = Vec<Card>> {
    unique_cards_up_to(13).prop_map(move |cards| {
        let mut hand: Vec<Card> = cards.into_iter().filter(|c| c.suit != excluded).collect();
        if hand.is_empty() {
            // Filtering can empty the hand; re-seed with a fixed off-suit card.
            let suit = Suit::ALL
                .into_iter()
                .find(|&s| s != excluded)
                .expect("three suits remain");
            hand.push(Card {
                suit,
                rank: Rank::Two,
            });
        }
        hand
    })
}

/// Complete trick: 4 unique cards played in seat order from a random leader.
pub fn complete_trick() -> impl Strategy<Value = Vec<(Seat, Card)>> {
    (seat(), unique_cards(4)).prop_map(|(leader, cards)| {
        cards
            .into_iter()
            .enumerate()
            .map(|(i, card)| ((leader + i as Seat) % 4, card))
            .collect()
    })
}
