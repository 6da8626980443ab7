//! Per-seat view of the session handed to decision providers.
//!
//! A view is a snapshot by value: a provider can hold it across an await
//! point without borrowing the live session, and nothing it does can
//! mutate game state.

use crate::domain::rules::SEATS;
use crate::domain::state::{GameSession, Seat, TeamId};
use crate::domain::teams::teammate_seat;
use crate::domain::{tricks, Card, Suit};

#[derive(Debug, Clone)]
pub struct SeatView {
    pub seat: Seat,
    pub hand: Vec<Card>,
    /// Plays of the active trick, in order.
    pub trick: Vec<(Seat, Card)>,
    pub handles: [String; SEATS],
    /// Every seat's collected pile so far this round.
    pub collected: [Vec<Card>; SEATS],
    pub cumulative: [i32; 2],
}

impl SeatView {
    pub fn for_seat(session: &GameSession, seat: Seat) -> Self {
        let mut handles: [String; SEATS] = Default::default();
        for (slot, info) in handles.iter_mut().zip(session.seats.iter()) {
            *slot = info.handle.clone();
        }
        SeatView {
            seat,
            hand: session.hands[seat as usize].clone(),
            trick: session.trick.clone(),
            handles,
            collected: session.collected.clone(),
            cumulative: session.cumulative,
        }
    }

    pub fn led_suit(&self) -> Option<Suit> {
        self.trick.first().map(|&(_, c)| c.suit)
    }

    pub fn legal_plays(&self) -> Vec<Card> {
        tricks::legal_plays(&self.hand, self.led_suit())
    }

    pub fn team(&self) -> TeamId {
        crate::domain::teams::team_of_seat(self.seat)
    }

    pub fn teammate(&self) -> Seat {
        teammate_seat(self.seat)
    }

    /// Whether this seat plays last in the current trick.
    pub fn is_final_play(&self) -> bool {
        self.trick.len() == SEATS - 1
    }
}
