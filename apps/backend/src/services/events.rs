//! Outbound events produced by command handling.
//!
//! Events are transport-agnostic: each carries its payload plus, where
//! scoped, the player it is addressed to. The websocket layer maps them
//! onto wire messages and delivery.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Card, PlayerKey, PublicSnapshot, Seat, TeamId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub player_id: PlayerKey,
    pub handle: String,
    pub is_bot: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatCollected {
    pub seat: Seat,
    pub handle: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamSummary {
    pub players: [String; 2],
    pub round_score: i32,
    pub cumulative_score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundOverPayload {
    /// Final per-seat scores for the round, keyed by handle.
    pub individual_scores: BTreeMap<String, i32>,
    pub collected_by_handle: BTreeMap<String, Vec<Card>>,
    /// Indexed by team id.
    pub team_info: [TeamSummary; 2],
    pub game_ended: bool,
    pub winning_team: Option<TeamId>,
}

#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Broadcast: current roster in registration order.
    Roster(Vec<RosterEntry>),
    /// Private: one seat's current hand.
    Hand { to: PlayerKey, cards: Vec<Card> },
    /// Broadcast: public session snapshot.
    Snapshot(PublicSnapshot),
    /// Private: a play was rejected, state untouched.
    InvalidPlay {
        to: PlayerKey,
        card: String,
        reason: String,
    },
    /// Broadcast: all seats' running collections.
    Collected(Vec<SeatCollected>),
    /// Broadcast: round scoring, cumulative totals, game-end flag.
    RoundOver(RoundOverPayload),
    /// Private: a command was rejected, state untouched.
    Rejected {
        to: PlayerKey,
        code: &'static str,
        reason: String,
    },
}
