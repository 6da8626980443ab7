//! The session coordinator's command handlers.
//!
//! `GameFlow` owns the roster and the single live `GameSession` and turns
//! each inbound command into a new state plus outbound events. Every
//! handler is total: it either commits a valid next state and returns
//! events, or leaves state untouched and returns a rejection event (or
//! `Err` for command-level failures the caller reports). Serialization of
//! commands is the caller's job; nothing here is re-entrant.

use std::collections::BTreeMap;

use tracing::info;

use crate::domain::player_view::SeatView;
use crate::domain::rules::SEATS;
use crate::domain::scoring::{game_outcome, score_round, team_round_scores};
use crate::domain::state::{GameSession, Phase, SeatInfo};
use crate::domain::teams::{assign_teams, seating_order};
use crate::domain::{dealing, parse_card, tricks, Card, PlayerKey, PublicSnapshot, Seat};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::events::{
    GameEvent, RosterEntry, RoundOverPayload, SeatCollected, TeamSummary,
};

#[derive(Default)]
pub struct GameFlow {
    /// Humans in registration order; bots appended by `start`.
    roster: Vec<RosterEntry>,
    session: Option<GameSession>,
    deal_seed: Option<u64>,
    team_seed: Option<u64>,
}

impl GameFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic flow for tests.
    #[cfg(test)]
    pub fn with_seeds(deal_seed: u64, team_seed: u64) -> Self {
        Self {
            deal_seed: Some(deal_seed),
            team_seed: Some(team_seed),
            ..Self::default()
        }
    }

    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    fn roster_event(&self) -> GameEvent {
        GameEvent::Roster(self.roster.clone())
    }

    /// Add a player or update their handle; emits the new roster.
    pub fn register(&mut self, player: PlayerKey, handle: String) -> Vec<GameEvent> {
        match self.roster.iter_mut().find(|e| e.player_id == player) {
            Some(entry) => entry.handle = handle,
            None => self.roster.push(RosterEntry {
                player_id: player,
                handle,
                is_bot: false,
            }),
        }
        vec![self.roster_event()]
    }

    /// Remove a player from the roster. A live session keeps referencing
    /// the vacated seat until the next start/continue.
    pub fn disconnect(&mut self, player: PlayerKey) -> Vec<GameEvent> {
        self.roster.retain(|e| e.player_id != player);
        vec![self.roster_event()]
    }

    /// Seats still to be filled with bots before a game can start.
    pub fn missing_seats(&self) -> Result<usize, DomainError> {
        let humans = self.roster.iter().filter(|e| !e.is_bot).count();
        if humans == 0 {
            return Err(DomainError::validation(
                ValidationKind::NoHumanSeat,
                "cannot start a game without a human player",
            ));
        }
        Ok(SEATS.saturating_sub(humans))
    }

    /// Fresh session: new teams and seating, cumulative scores reset.
    ///
    /// `bots` fills the table up to 4 seats (the caller owns the decision
    /// providers behind them); stale bot roster entries are replaced.
    pub fn start(&mut self, bots: Vec<RosterEntry>) -> Result<Vec<GameEvent>, DomainError> {
        let missing = self.missing_seats()?;
        if bots.len() != missing {
            return Err(DomainError::validation(
                ValidationKind::WrongPlayerCount,
                format!("expected {missing} bot seats, got {}", bots.len()),
            ));
        }

        let mut entries: Vec<RosterEntry> = self
            .roster
            .iter()
            .filter(|e| !e.is_bot)
            .take(SEATS)
            .cloned()
            .collect();
        entries.extend(bots);
        debug_assert_eq!(entries.len(), SEATS);

        // New roster: every registered human (seated or not, in
        // registration order) plus the fresh bots; stale bots drop out.
        let mut roster: Vec<RosterEntry> = self
            .roster
            .iter()
            .filter(|e| !e.is_bot)
            .cloned()
            .collect();
        roster.extend(entries.iter().filter(|e| e.is_bot).cloned());

        let players: [PlayerKey; SEATS] =
            std::array::from_fn(|i| entries[i].player_id);
        let teams = assign_teams(players, self.team_seed);
        let order = seating_order(&teams);
        let seats: [SeatInfo; SEATS] = std::array::from_fn(|i| {
            let entry = entries
                .iter()
                .find(|e| e.player_id == order[i])
                .expect("seating order is a permutation of the entries");
            SeatInfo {
                player: entry.player_id,
                handle: entry.handle.clone(),
                is_bot: entry.is_bot,
            }
        });

        self.roster = roster;
        let session = GameSession {
            seats,
            phase: Phase::AwaitingPlay,
            hands: dealing::deal(self.deal_seed),
            trick: Vec::new(),
            turn: 0,
            collected: Default::default(),
            teams,
            cumulative: [0, 0],
        };
        info!(
            seating = ?session.seats.iter().map(|s| s.handle.as_str()).collect::<Vec<_>>(),
            "session started"
        );

        let mut events = vec![self.roster_event()];
        events.extend(Self::deal_events(&session));
        self.session = Some(session);
        Ok(events)
    }

    /// Next round of the same game: teams, seating order, and cumulative
    /// scores are preserved; only the deal is new.
    pub fn continue_round(&mut self) -> Result<Vec<GameEvent>, DomainError> {
        let session = self.session.as_mut().ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NoSessionToContinue,
                "no session with assigned teams to continue",
            )
        })?;
        let seated = session
            .seats
            .iter()
            .filter(|s| s.is_bot || self.roster.iter().any(|e| e.player_id == s.player))
            .count();
        if seated != SEATS {
            return Err(DomainError::validation(
                ValidationKind::WrongPlayerCount,
                "a seated player has disconnected; start a new game",
            ));
        }

        session.hands = dealing::deal(self.deal_seed);
        session.trick.clear();
        session.collected = Default::default();
        session.turn = 0;
        session.phase = Phase::AwaitingPlay;
        info!(cumulative = ?session.cumulative, "round continued");

        Ok(Self::deal_events(session))
    }

    fn deal_events(session: &GameSession) -> Vec<GameEvent> {
        let mut events: Vec<GameEvent> = session
            .seats
            .iter()
            .zip(session.hands.iter())
            .map(|(seat, hand)| GameEvent::Hand {
                to: seat.player,
                cards: hand.clone(),
            })
            .collect();
        events.push(GameEvent::Snapshot(PublicSnapshot::of(session)));
        events
    }

    /// Handle a play command from a connection.
    pub fn play(&mut self, player: PlayerKey, token: &str) -> Vec<GameEvent> {
        let Some(session) = self.session.as_ref() else {
            return vec![GameEvent::Rejected {
                to: player,
                code: "NO_ACTIVE_SESSION",
                reason: "no game in progress".to_string(),
            }];
        };
        let Some(seat) = session.seat_of(player) else {
            return vec![GameEvent::Rejected {
                to: player,
                code: "NOT_SEATED",
                reason: "you are not seated in this game".to_string(),
            }];
        };
        let card = match parse_card(token) {
            Ok(card) => card,
            Err(err) => {
                return vec![GameEvent::InvalidPlay {
                    to: player,
                    card: token.to_string(),
                    reason: err.detail().to_string(),
                }];
            }
        };
        self.apply_play(seat, card)
    }

    /// Apply one play for a seat. Bot plays enter here with the same
    /// validation as human plays.
    pub fn apply_play(&mut self, seat: Seat, card: Card) -> Vec<GameEvent> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let player = session.seats[seat as usize].player;

        let result = match tricks::play_card(session, seat, card) {
            Ok(result) => result,
            Err(err) => {
                return vec![GameEvent::InvalidPlay {
                    to: player,
                    card: card.to_string(),
                    reason: err.detail().to_string(),
                }];
            }
        };

        let mut events = vec![GameEvent::Hand {
            to: player,
            cards: session.hands[seat as usize].clone(),
        }];
        if result.trick_winner.is_some() {
            events.push(GameEvent::Collected(Self::collected_event(session)));
        }
        events.push(GameEvent::Snapshot(PublicSnapshot::of(session)));
        if result.round_completed {
            events.push(GameEvent::RoundOver(Self::settle_round(session)));
        }
        events
    }

    fn collected_event(session: &GameSession) -> Vec<SeatCollected> {
        (0..SEATS)
            .map(|i| SeatCollected {
                seat: i as Seat,
                handle: session.seats[i].handle.clone(),
                cards: session.collected[i].clone(),
            })
            .collect()
    }

    /// Score the completed round, fold the totals into the cumulative
    /// team scores, and check for game end.
    fn settle_round(session: &mut GameSession) -> RoundOverPayload {
        let seat_scores = score_round(session);
        let round_totals = team_round_scores(&seat_scores);
        for team in 0..2 {
            session.cumulative[team] += round_totals[team];
        }
        let outcome = game_outcome(session.cumulative);

        let mut individual_scores = BTreeMap::new();
        let mut collected_by_handle = BTreeMap::new();
        for i in 0..SEATS {
            let handle = session.seats[i].handle.clone();
            individual_scores.insert(handle.clone(), seat_scores[i].final_score);
            collected_by_handle.insert(handle, session.collected[i].clone());
        }

        let team_info: [TeamSummary; 2] = std::array::from_fn(|team| TeamSummary {
            players: [
                session.seats[team].handle.clone(),
                session.seats[team + 2].handle.clone(),
            ],
            round_score: round_totals[team],
            cumulative_score: session.cumulative[team],
        });

        info!(
            round = ?round_totals,
            cumulative = ?session.cumulative,
            ended = outcome.ended,
            "round settled"
        );

        RoundOverPayload {
            individual_scores,
            collected_by_handle,
            team_info,
            game_ended: outcome.ended,
            winning_team: outcome.winning_team,
        }
    }

    /// The bot seat that should act now, if any.
    pub fn current_bot_turn(&self) -> Option<(Seat, PlayerKey)> {
        let session = self.session.as_ref()?;
        if session.phase != Phase::AwaitingPlay {
            return None;
        }
        let info = &session.seats[session.turn as usize];
        info.is_bot.then_some((session.turn, info.player))
    }

    pub fn view_for(&self, seat: Seat) -> Option<SeatView> {
        self.session
            .as_ref()
            .map(|session| SeatView::for_seat(session, seat))
    }

    /// Server-side last resort when a provider errors out entirely.
    pub fn fallback_card(&self, seat: Seat) -> Option<Card> {
        let session = self.session.as_ref()?;
        tricks::legal_plays(&session.hands[seat as usize], session.led_suit())
            .first()
            .copied()
    }
}
