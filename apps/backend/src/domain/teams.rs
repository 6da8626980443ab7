//! Team pairing and seating order.
//!
//! Seats are interleaved `[A0, B0, A1, B1]` so teammates never occupy
//! adjacent turn positions; a player never acts directly after their
//! teammate and cannot react to the teammate's play for free.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::domain::rules::SEATS;
use crate::domain::state::{PlayerKey, Seat, TeamId};

/// The 4 players partitioned into two fixed pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    pub teams: [[PlayerKey; 2]; 2],
}

impl TeamAssignment {
    pub fn team_of(&self, player: PlayerKey) -> Option<TeamId> {
        for (team, members) in self.teams.iter().enumerate() {
            if members.contains(&player) {
                return Some(team as TeamId);
            }
        }
        None
    }

    pub fn members(&self, team: TeamId) -> [PlayerKey; 2] {
        self.teams[team as usize]
    }
}

/// Randomly pair the 4 players: shuffled positions (0,1) become team 0,
/// (2,3) become team 1.
pub fn assign_teams(mut players: [PlayerKey; SEATS], seed: Option<u64>) -> TeamAssignment {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    players.shuffle(&mut rng);
    TeamAssignment {
        teams: [[players[0], players[1]], [players[2], players[3]]],
    }
}

/// Interleave the two teams into turn order: `[A0, B0, A1, B1]`.
pub fn seating_order(assignment: &TeamAssignment) -> [PlayerKey; SEATS] {
    let [a, b] = &assignment.teams;
    [a[0], b[0], a[1], b[1]]
}

/// Team occupying a seat of an interleaved seating order.
pub fn team_of_seat(seat: Seat) -> TeamId {
    (seat % 2) as TeamId
}

/// The seat two positions around the table holds the teammate.
pub fn teammate_seat(seat: Seat) -> Seat {
    (seat + 2) % SEATS as Seat
}
