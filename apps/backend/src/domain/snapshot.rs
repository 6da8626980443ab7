//! Public session snapshot broadcast to every seat.
//!
//! Contains only information visible to all players: the active trick,
//! whose turn it is, the roster, team pairing, and cumulative team
//! scores. Hands never appear here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::rules::SEATS;
use crate::domain::scoring::score_collected;
use crate::domain::state::{GameSession, Seat};
use crate::domain::teams::team_of_seat;
use crate::domain::Card;

#[derive(Debug, Clone, Serialize)]
pub struct TrickPlay {
    pub seat: Seat,
    pub handle: String,
    pub card: Card,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSeat {
    pub seat: Seat,
    pub handle: String,
    pub is_bot: bool,
    pub team: u8,
    pub cards_remaining: usize,
    pub collected_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicSnapshot {
    pub trick: Vec<TrickPlay>,
    pub turn: Seat,
    pub seats: Vec<SnapshotSeat>,
    /// Running round score per player, from their collected pile. All
    /// zeroes right after a deal.
    pub scores: BTreeMap<String, i32>,
    /// Team member handles, indexed by team id.
    pub teams: [[String; 2]; 2],
    pub cumulative_team_scores: [i32; 2],
}

impl PublicSnapshot {
    pub fn of(session: &GameSession) -> Self {
        let trick = session
            .trick
            .iter()
            .map(|&(seat, card)| TrickPlay {
                seat,
                handle: session.seats[seat as usize].handle.clone(),
                card,
            })
            .collect();

        let seats = (0..SEATS as Seat)
            .map(|seat| {
                let info = &session.seats[seat as usize];
                SnapshotSeat {
                    seat,
                    handle: info.handle.clone(),
                    is_bot: info.is_bot,
                    team: team_of_seat(seat),
                    cards_remaining: session.hands[seat as usize].len(),
                    collected_count: session.collected[seat as usize].len(),
                }
            })
            .collect();

        let scores: BTreeMap<String, i32> = (0..SEATS)
            .map(|i| {
                (
                    session.seats[i].handle.clone(),
                    score_collected(&session.collected[i]).final_score,
                )
            })
            .collect();

        let mut teams: [[String; 2]; 2] = Default::default();
        for seat in 0..SEATS as Seat {
            let team = team_of_seat(seat) as usize;
            let slot = (seat / 2) as usize;
            teams[team][slot] = session.seats[seat as usize].handle.clone();
        }

        PublicSnapshot {
            trick,
            turn: session.turn,
            seats,
            scores,
            teams,
            cumulative_team_scores: session.cumulative,
        }
    }
}
