//! Trick state machine: play legality, trick resolution, round completion.

use crate::domain::cards::hand_has_suit;
use crate::domain::rules::TRICK_SIZE;
use crate::domain::state::{next_seat, GameSession, Phase, Seat};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Outcome of a single accepted play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Set when this play was the fourth of the trick.
    pub trick_winner: Option<Seat>,
    /// Set alongside `trick_winner` when no cards remain in any hand.
    pub round_completed: bool,
}

/// The subset of `hand` a seat may legally play given the led suit:
/// cards of the led suit when any are held, otherwise the whole hand.
/// Leading (no led suit) is unrestricted.
pub fn legal_plays(hand: &[Card], led: Option<Suit>) -> Vec<Card> {
    match led {
        Some(suit) if hand_has_suit(hand, suit) => {
            hand.iter().copied().filter(|c| c.suit == suit).collect()
        }
        _ => hand.to_vec(),
    }
}

/// The seat that played the highest card of the led suit. Off-suit plays
/// never win a trick.
pub fn trick_winner(trick: &[(Seat, Card)]) -> Seat {
    let led = trick[0].1.suit;
    trick
        .iter()
        .filter(|&&(_, c)| c.suit == led)
        .max_by_key(|&&(_, c)| c.rank)
        .map(|&(seat, _)| seat)
        .expect("the leader always matches the led suit")
}

/// Validate and apply one play.
///
/// Guards run in a fixed order (phase, turn, card ownership, follow-suit)
/// and no state is mutated until every guard has passed. On the fourth
/// play the winner collects the trick, leads next, and the round is
/// flagged complete once all hands are empty.
pub fn play_card(
    session: &mut GameSession,
    seat: Seat,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    if session.phase != Phase::AwaitingPlay {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "the round is already complete",
        ));
    }
    if seat != session.turn {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("seat {seat} played out of turn (expected seat {})", session.turn),
        ));
    }
    let hand = &session.hands[seat as usize];
    let Some(card_idx) = hand.iter().position(|&c| c == card) else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("{card} is not in the seat's hand"),
        ));
    };
    if let Some(led) = session.led_suit() {
        if card.suit != led && hand_has_suit(hand, led) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("must follow {} when holding it", led.symbol()),
            ));
        }
    }

    // All guards passed; mutate.
    session.hands[seat as usize].remove(card_idx);
    session.trick.push((seat, card));

    if session.trick.len() < TRICK_SIZE {
        session.turn = next_seat(seat);
        return Ok(PlayCardResult {
            trick_winner: None,
            round_completed: false,
        });
    }

    let winner = trick_winner(&session.trick);
    let taken: Vec<Card> = session.trick.drain(..).map(|(_, c)| c).collect();
    session.collected[winner as usize].extend(taken);
    session.turn = winner;

    let round_completed = session.all_hands_empty();
    if round_completed {
        session.phase = Phase::RoundComplete;
    }
    Ok(PlayCardResult {
        trick_winner: Some(winner),
        round_completed,
    })
}
