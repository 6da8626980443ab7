//! Test-only session construction helpers for domain unit tests.

pub use session_helpers::{session_with_hands, test_players};

mod session_helpers {
    use uuid::Uuid;

    use crate::domain::rules::SEATS;
    use crate::domain::state::{GameSession, Phase, PlayerKey, SeatInfo};
    use crate::domain::teams::TeamAssignment;
    use crate::domain::Card;

    pub fn test_players() -> [PlayerKey; SEATS] {
        [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()]
    }

    /// Build a session with the given hands, seat 0 to lead.
    ///
    /// Seating is already interleaved: seats 0 and 2 are team 0, seats 1
    /// and 3 are team 1.
    pub fn session_with_hands(hands: [Vec<Card>; SEATS]) -> GameSession {
        let players = test_players();
        let seats: [SeatInfo; SEATS] = std::array::from_fn(|i| SeatInfo {
            player: players[i],
            handle: format!("player-{i}"),
            is_bot: false,
        });
        GameSession {
            seats,
            phase: Phase::AwaitingPlay,
            hands,
            trick: Vec::new(),
            turn: 0,
            collected: Default::default(),
            teams: TeamAssignment {
                teams: [[players[0], players[2]], [players[1], players[3]]],
            },
            cumulative: [0, 0],
        }
    }
}
