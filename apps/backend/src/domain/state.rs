use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::rules::SEATS;
use crate::domain::teams::TeamAssignment;
use crate::domain::{teams, Card, Suit};

/// Stable key for a player across the roster and session (connection id
/// for humans, generated id for bots).
pub type PlayerKey = Uuid;

/// Turn position around the table, 0..=3.
pub type Seat = u8;

/// Team index, 0 or 1.
pub type TeamId = u8;

/// Round progression phases. A session is terminal per round; `start` /
/// `continue` replace it wholesale.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// The seat at `turn` is expected to play a card.
    AwaitingPlay,
    /// All 13 tricks have been played; scoring applies.
    RoundComplete,
}

/// One seat of the seating order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub player: PlayerKey,
    pub handle: String,
    pub is_bot: bool,
}

/// The single live game session: seating, hands, the active trick, and
/// per-round collections, plus the cross-round team pairing and
/// cumulative team scores.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seating order (index = turn position). Teammates are never adjacent.
    pub seats: [SeatInfo; SEATS],
    /// Current phase of the round.
    pub phase: Phase,
    /// Each seat's remaining hand; strictly shrinks during a round.
    pub hands: [Vec<Card>; SEATS],
    /// Ordered plays of the active trick; position 0 defines the led suit.
    pub trick: Vec<(Seat, Card)>,
    /// Seat expected to act.
    pub turn: Seat,
    /// Cards collected by each seat from won tricks this round.
    pub collected: [Vec<Card>; SEATS],
    /// Team pairing, preserved across `continue` rounds.
    pub teams: TeamAssignment,
    /// Cumulative team scores across rounds; reset only by a fresh start.
    pub cumulative: [i32; 2],
}

impl GameSession {
    pub fn led_suit(&self) -> Option<Suit> {
        self.trick.first().map(|&(_, c)| c.suit)
    }

    pub fn seat_of(&self, player: PlayerKey) -> Option<Seat> {
        self.seats
            .iter()
            .position(|s| s.player == player)
            .map(|i| i as Seat)
    }

    pub fn team_of_seat(&self, seat: Seat) -> TeamId {
        debug_assert_eq!(
            self.teams.team_of(self.seats[seat as usize].player),
            Some(teams::team_of_seat(seat)),
            "seating must stay interleaved"
        );
        teams::team_of_seat(seat)
    }

    /// True once every hand has been emptied (13 tricks elapsed).
    pub fn all_hands_empty(&self) -> bool {
        self.hands.iter().all(|h| h.is_empty())
    }
}

pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % SEATS as Seat
}
