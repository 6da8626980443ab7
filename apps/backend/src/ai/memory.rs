//! Card memory derived from a seat's view.
//!
//! Reconstructed from public information only (collected piles plus the
//! active trick); nothing here peeks at hidden hands.

use std::collections::BTreeSet;

use crate::domain::cards::{DOUBLER, GOAT, PIG};
use crate::domain::player_view::SeatView;
use crate::domain::{Card, Rank, Suit};

/// Cards whose whereabouts most influence play decisions.
pub const KEY_CARDS: [Card; 9] = [
    Card {
        suit: Suit::Spades,
        rank: Rank::Ace,
    },
    Card {
        suit: Suit::Spades,
        rank: Rank::King,
    },
    PIG,
    Card {
        suit: Suit::Hearts,
        rank: Rank::Ace,
    },
    Card {
        suit: Suit::Hearts,
        rank: Rank::King,
    },
    Card {
        suit: Suit::Hearts,
        rank: Rank::Queen,
    },
    Card {
        suit: Suit::Hearts,
        rank: Rank::Jack,
    },
    GOAT,
    DOUBLER,
];

#[derive(Debug, Clone, Default)]
pub struct CardMemory {
    /// Cards seen this round: all collected piles plus the active trick.
    pub played: BTreeSet<Card>,
}

impl CardMemory {
    pub fn from_view(view: &SeatView) -> Self {
        let mut played: BTreeSet<Card> = view.collected.iter().flatten().copied().collect();
        played.extend(view.trick.iter().map(|&(_, c)| c));
        Self { played }
    }

    pub fn played_count(&self) -> usize {
        self.played.len()
    }

    pub fn remaining_count(&self) -> usize {
        52 - self.played.len()
    }

    /// Key cards not yet seen this round.
    pub fn key_cards_remaining(&self) -> Vec<Card> {
        KEY_CARDS
            .into_iter()
            .filter(|c| !self.played.contains(c))
            .collect()
    }

    pub fn was_played(&self, card: Card) -> bool {
        self.played.contains(&card)
    }
}
