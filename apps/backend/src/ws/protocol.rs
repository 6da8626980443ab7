//! Wire messages. Cards travel as their textual form (`"10♥"`, `"Q♠"`);
//! there is no separate binary encoding.

use serde::{Deserialize, Serialize};

use crate::domain::{Card, PublicSnapshot};
use crate::services::events::{RosterEntry, RoundOverPayload, SeatCollected};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Register { handle: String },
    Start,
    Continue,
    Play { card: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    Roster {
        players: Vec<RosterEntry>,
    },
    /// Private: only ever sent to the owning seat.
    Hand {
        cards: Vec<Card>,
    },
    GameState {
        snapshot: PublicSnapshot,
    },
    /// Private: rejected play, no state change.
    InvalidPlay {
        card: String,
        reason: String,
    },
    Collected {
        piles: Vec<SeatCollected>,
    },
    RoundOver(RoundOverPayload),
    Error {
        code: String,
        message: String,
    },
}
