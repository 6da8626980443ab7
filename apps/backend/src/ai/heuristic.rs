//! Rule-based decision provider with difficulty tiers.
//!
//! - `Easy`: delegates to [`RandomPlayer`] for a uniform-random legal card.
//! - `Medium`: prefer legal cards that are neither hearts nor the pig,
//!   unless none exist or the trick is nearly full.
//! - `Hard`: classifies the situation into a strategy (lead safely,
//!   avoid penalty, capture the goat, support teammate, dump penalty)
//!   and routes to the matching selector.
//!
//! Every branch returns a member of the legal set; the tiers differ only
//! in how they pick within it.

use std::str::FromStr;

use async_trait::async_trait;
use tracing::debug;

use super::random::RandomPlayer;
use super::trait_def::{AiError, AiPlayer};
use crate::domain::cards::{GOAT, PIG};
use crate::domain::player_view::SeatView;
use crate::domain::scoring::card_points;
use crate::domain::tricks;
use crate::domain::{Card, Rank, Suit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    LeadSafe,
    AvoidPenalty,
    CaptureGoat,
    SupportTeammate,
    DumpPenalty,
}

pub struct Heuristic {
    difficulty: Difficulty,
    /// Backs the easy tier; seedable for deterministic tests.
    random: RandomPlayer,
}

impl Heuristic {
    pub fn new(difficulty: Difficulty, seed: Option<u64>) -> Self {
        Self {
            difficulty,
            random: RandomPlayer::new(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    // ---------- Small pure selectors ----------

    fn lowest(cards: &[Card]) -> Card {
        cards
            .iter()
            .copied()
            .min_by_key(|c| c.rank)
            .expect("selector called with a non-empty set")
    }

    fn is_penalty(card: Card) -> bool {
        card.is_heart() || card == PIG
    }

    /// Legal cards that would currently win the trick.
    fn winning_cards(legal: &[Card], trick: &[(u8, Card)]) -> Vec<Card> {
        let Some(&(_, first)) = trick.first() else {
            return legal.to_vec();
        };
        let led = first.suit;
        let highest = trick
            .iter()
            .filter(|&&(_, c)| c.suit == led)
            .map(|&(_, c)| c.rank)
            .max()
            .unwrap_or(Rank::Two);
        legal
            .iter()
            .copied()
            .filter(|c| c.suit == led && c.rank > highest)
            .collect()
    }

    fn teammate_is_winning(view: &SeatView) -> bool {
        !view.trick.is_empty() && tricks::trick_winner(&view.trick) == view.teammate()
    }

    /// Whether every legal card is off the led suit (the seat is void).
    fn void_in_led(view: &SeatView, legal: &[Card]) -> bool {
        match view.led_suit() {
            Some(led) => legal.iter().all(|c| c.suit != led),
            None => false,
        }
    }

    // ---------- Strategy dispatch (hard tier) ----------

    fn determine_strategy(view: &SeatView, legal: &[Card]) -> Strategy {
        if view.trick.is_empty() {
            return Strategy::LeadSafe;
        }
        let goat_in_trick = view.trick.iter().any(|&(_, c)| c == GOAT);
        if goat_in_trick
            && view.is_final_play()
            && !Self::winning_cards(legal, &view.trick).is_empty()
        {
            return Strategy::CaptureGoat;
        }
        if Self::teammate_is_winning(view) {
            // A penalty dumped here would land on our own team.
            return Strategy::SupportTeammate;
        }
        let void = Self::void_in_led(view, legal);
        let holds_penalty = legal.iter().any(|&c| Self::is_penalty(c));
        if void && holds_penalty {
            return Strategy::DumpPenalty;
        }
        Strategy::AvoidPenalty
    }

    fn select(strategy: Strategy, view: &SeatView, legal: &[Card]) -> Card {
        match strategy {
            Strategy::LeadSafe => Self::select_lead_safe(legal),
            Strategy::AvoidPenalty => Self::select_avoid_penalty(view, legal),
            Strategy::CaptureGoat => Self::select_capture_goat(view, legal),
            Strategy::SupportTeammate => Self::select_support_teammate(legal),
            Strategy::DumpPenalty => Self::select_dump_penalty(view, legal),
        }
    }

    /// Lead with a low card that is neither a penalty nor a high spade
    /// that could later be forced to take the pig.
    fn select_lead_safe(legal: &[Card]) -> Card {
        let high_spade = |c: Card| c.suit == Suit::Spades && c.rank >= Rank::King;
        let safe: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|&c| !Self::is_penalty(c) && !high_spade(c))
            .collect();
        if safe.is_empty() {
            Self::lowest(legal)
        } else {
            Self::lowest(&safe)
        }
    }

    /// Prefer cards that neither score against us nor take the trick.
    fn select_avoid_penalty(view: &SeatView, legal: &[Card]) -> Card {
        let safe: Vec<Card> = legal.iter().copied().filter(|&c| !Self::is_penalty(c)).collect();
        let candidates = if safe.is_empty() { legal.to_vec() } else { safe };
        let winning = Self::winning_cards(&candidates, &view.trick);
        let ducking: Vec<Card> = candidates
            .iter()
            .copied()
            .filter(|c| !winning.contains(c))
            .collect();
        if ducking.is_empty() {
            Self::lowest(&candidates)
        } else {
            Self::lowest(&ducking)
        }
    }

    /// Take the trick carrying the goat, as cheaply as possible.
    fn select_capture_goat(view: &SeatView, legal: &[Card]) -> Card {
        let winning = Self::winning_cards(legal, &view.trick);
        if winning.is_empty() {
            Self::select_avoid_penalty(view, legal)
        } else {
            Self::lowest(&winning)
        }
    }

    /// Teammate is taking the trick; conserve strength and keep penalties
    /// out of their pile.
    fn select_support_teammate(legal: &[Card]) -> Card {
        let safe: Vec<Card> = legal.iter().copied().filter(|&c| !Self::is_penalty(c)).collect();
        if safe.is_empty() {
            Self::lowest(legal)
        } else {
            Self::lowest(&safe)
        }
    }

    /// Void in the led suit with penalties in hand: shed the worst one.
    fn select_dump_penalty(view: &SeatView, legal: &[Card]) -> Card {
        legal
            .iter()
            .copied()
            .filter(|&c| Self::is_penalty(c))
            .min_by_key(|&c| card_points(c))
            .unwrap_or_else(|| Self::select_avoid_penalty(view, legal))
    }

    fn choose_medium(view: &SeatView, legal: &[Card]) -> Card {
        let safe: Vec<Card> = legal.iter().copied().filter(|&c| !Self::is_penalty(c)).collect();
        if safe.is_empty() || view.is_final_play() {
            Self::lowest(legal)
        } else {
            Self::lowest(&safe)
        }
    }
}

#[async_trait]
impl AiPlayer for Heuristic {
    fn name(&self) -> &'static str {
        "Heuristic"
    }

    async fn choose_play(&self, view: &SeatView) -> Result<Card, AiError> {
        let legal = view.legal_plays();
        if legal.is_empty() {
            return Err(AiError::Internal("no legal plays available".into()));
        }
        if legal.len() == 1 {
            return Ok(legal[0]);
        }

        let card = match self.difficulty {
            Difficulty::Easy => self.random.choose_play(view).await?,
            Difficulty::Medium => Self::choose_medium(view, &legal),
            Difficulty::Hard => {
                let strategy = Self::determine_strategy(view, &legal);
                debug!(seat = view.seat, strategy = ?strategy, "heuristic strategy chosen");
                Self::select(strategy, view, &legal)
            }
        };
        debug_assert!(legal.contains(&card));
        Ok(card)
    }
}
