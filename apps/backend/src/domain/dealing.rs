//! Deck construction and dealing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::rules::{HAND_SIZE, SEATS};
use crate::domain::{Card, Rank, Suit};

/// Generate the full 52-card deck in a deterministic order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Fisher-Yates shuffle; seedable for deterministic tests.
pub fn shuffle(deck: &mut [Card], seed: Option<u64>) {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    deck.shuffle(&mut rng);
}

/// Deal four 13-card hands by slicing the shuffled deck contiguously,
/// one slice per seat in seating order.
///
/// Contract: every card of the deck lands in exactly one hand.
pub fn deal(seed: Option<u64>) -> [Vec<Card>; SEATS] {
    let mut deck = full_deck();
    shuffle(&mut deck, seed);

    let mut hands: [Vec<Card>; SEATS] = Default::default();
    for (seat, hand_slot) in hands.iter_mut().enumerate() {
        let start = seat * HAND_SIZE;
        let mut hand = deck[start..start + HAND_SIZE].to_vec();
        hand.sort();
        *hand_slot = hand;
    }
    hands
}
