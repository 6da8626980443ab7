//! Round scoring: per-seat card values, the shoot-the-moon override, the
//! doubler, team aggregation, and the game-end check.

use serde::Serialize;

use crate::domain::cards::{DOUBLER, GOAT, PIG};
use crate::domain::rules::{HAND_SIZE, LOSS_THRESHOLD, SEATS, WIN_THRESHOLD};
use crate::domain::state::{GameSession, Seat, TeamId};
use crate::domain::teams::team_of_seat;
use crate::domain::{Card, Rank, Suit};

/// Value of a single collected card, ignoring the doubler and the moon
/// override.
pub fn card_points(card: Card) -> i32 {
    if card == PIG {
        return -100;
    }
    if card == GOAT {
        return 100;
    }
    if card.suit != Suit::Hearts {
        return 0;
    }
    match card.rank {
        Rank::Ace => -50,
        Rank::King => -40,
        Rank::Queen => -30,
        Rank::Jack => -20,
        Rank::Ten | Rank::Nine | Rank::Eight | Rank::Seven | Rank::Six | Rank::Five => -10,
        Rank::Four | Rank::Three | Rank::Two => 0,
    }
}

/// One seat's round result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatScore {
    /// Score before the doubler multiplier (moon override already applied).
    pub base: i32,
    /// Score after the doubler.
    pub final_score: i32,
    pub heart_count: usize,
    pub has_pig: bool,
    pub has_goat: bool,
    pub has_doubler: bool,
    pub shot_the_moon: bool,
}

/// Score one seat's collected pile.
pub fn score_collected(collected: &[Card]) -> SeatScore {
    let heart_count = collected.iter().filter(|c| c.is_heart()).count();
    let has_pig = collected.contains(&PIG);
    let has_goat = collected.contains(&GOAT);
    let has_doubler = collected.contains(&DOUBLER);
    let shot_the_moon = heart_count == HAND_SIZE;

    let base = if shot_the_moon {
        // Every heart collected flips the heart/pig penalties to a bonus.
        let mut base = 200;
        if has_pig {
            base += 100;
        }
        if has_goat {
            base += 100;
        }
        base
    } else {
        collected.iter().map(|&c| card_points(c)).sum()
    };

    let final_score = if has_doubler {
        let only_scoring_card = heart_count == 0 && !has_pig && !has_goat;
        if only_scoring_card {
            50
        } else {
            base * 2
        }
    } else {
        base
    };

    SeatScore {
        base,
        final_score,
        heart_count,
        has_pig,
        has_goat,
        has_doubler,
        shot_the_moon,
    }
}

/// Score every seat of a completed round.
pub fn score_round(session: &GameSession) -> [SeatScore; SEATS] {
    let mut scores = [score_collected(&[]); SEATS];
    for seat in 0..SEATS {
        scores[seat] = score_collected(&session.collected[seat]);
    }
    scores
}

/// Per-team round totals: sum of the two members' final scores, indexed
/// by team id.
pub fn team_round_scores(seat_scores: &[SeatScore; SEATS]) -> [i32; 2] {
    let mut totals = [0i32; 2];
    for (seat, score) in seat_scores.iter().enumerate() {
        totals[team_of_seat(seat as Seat) as usize] += score.final_score;
    }
    totals
}

/// Whether the game is over given cumulative team scores, and who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub ended: bool,
    pub winning_team: Option<TeamId>,
}

/// Checked after every round. A team wins by reaching the win threshold
/// or by its opponents collapsing to the loss threshold; reaching the
/// win threshold takes precedence if both happen at once.
pub fn game_outcome(cumulative: [i32; 2]) -> GameOutcome {
    for team in 0..2 {
        if cumulative[team] >= WIN_THRESHOLD {
            return GameOutcome {
                ended: true,
                winning_team: Some(team as TeamId),
            };
        }
    }
    for team in 0..2 {
        if cumulative[team] <= LOSS_THRESHOLD {
            return GameOutcome {
                ended: true,
                winning_team: Some((1 - team) as TeamId),
            };
        }
    }
    GameOutcome {
        ended: false,
        winning_team: None,
    }
}
