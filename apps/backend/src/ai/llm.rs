//! LLM-backed decision provider.
//!
//! Renders the seat's view into a natural-language prompt, asks the
//! configured completion provider, and parses a `<played_card>` token out
//! of the reply. The parsed card must land in the legal set; any provider
//! error, timeout, unparseable reply, or illegal card falls back to the
//! rule-based provider. Turn progression never stalls on this path.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use super::heuristic::{Difficulty, Heuristic};
use super::memory::CardMemory;
use super::providers::{GenerateOptions, TextCompletion};
use super::trait_def::{AiError, AiPlayer};
use crate::config::llm::LlmConfig;
use crate::domain::player_view::SeatView;
use crate::domain::teams::team_of_seat;
use crate::domain::{Card, Rank, Suit};

static REASONING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<reasoning[^>]*>(.*?)</reasoning>").expect("valid pattern"));
static PLAYED_CARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<played_card[^>]*>(.*?)</played_card>").expect("valid pattern"));

pub struct LlmPlayer {
    provider: Box<dyn TextCompletion>,
    timeout: Duration,
    fallback: Heuristic,
}

impl LlmPlayer {
    pub fn new(provider: Box<dyn TextCompletion>, timeout: Duration, fallback: Difficulty) -> Self {
        Self {
            provider,
            timeout,
            fallback: Heuristic::new(fallback, None),
        }
    }

    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(
            super::providers::create_provider(config),
            config.timeout,
            config.fallback_difficulty,
        )
    }

    async fn attempt(&self, view: &SeatView, legal: &[Card]) -> Result<Card, AiError> {
        let prompt = render_prompt(view, legal);
        let reply = self
            .provider
            .generate(&prompt, GenerateOptions::default())
            .await
            .map_err(|err| AiError::Internal(err.to_string()))?;
        debug!(provider = self.provider.name(), reply = %reply, "raw completion");

        if let Some(reasoning) = extract_tag(&REASONING_RE, &reply) {
            info!(seat = view.seat, %reasoning, "LLM reasoning");
        }
        parse_played_card(&reply, legal)
            .ok_or_else(|| AiError::Internal("no playable card in completion".into()))
    }
}

#[async_trait]
impl AiPlayer for LlmPlayer {
    fn name(&self) -> &'static str {
        "LlmPlayer"
    }

    async fn choose_play(&self, view: &SeatView) -> Result<Card, AiError> {
        let legal = view.legal_plays();
        if legal.is_empty() {
            return Err(AiError::Internal("no legal plays available".into()));
        }

        match tokio::time::timeout(self.timeout, self.attempt(view, &legal)).await {
            Ok(Ok(card)) if legal.contains(&card) => {
                info!(
                    seat = view.seat,
                    provider = self.provider.name(),
                    card = %card,
                    "LLM decision accepted"
                );
                return Ok(card);
            }
            Ok(Ok(card)) => {
                warn!(seat = view.seat, card = %card, "LLM chose an illegal card, falling back")
            }
            Ok(Err(err)) => warn!(seat = view.seat, %err, "LLM decision failed, falling back"),
            Err(_) => warn!(seat = view.seat, "LLM decision timed out, falling back"),
        }
        self.fallback.choose_play(view).await
    }
}

fn extract_tag(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Parse the reply for a legal card: the `<played_card>` tag first, then
/// the whole reply as a last resort.
fn parse_played_card(reply: &str, legal: &[Card]) -> Option<Card> {
    if let Some(tagged) = extract_tag(&PLAYED_CARD_RE, reply) {
        if let Some(card) = find_valid_card(&tagged, legal) {
            return Some(card);
        }
    }
    find_valid_card(reply, legal)
}

/// Scan free text for one of the legal cards: exact token first, then a
/// loose rank-plus-suit match scanning high ranks before low ones.
fn find_valid_card(text: &str, legal: &[Card]) -> Option<Card> {
    for &card in legal {
        if text.contains(&card.to_string()) {
            return Some(card);
        }
    }
    for rank in Rank::ALL.into_iter().rev() {
        for suit in Suit::ALL {
            let card = Card { suit, rank };
            if legal.contains(&card)
                && text.contains(rank.token())
                && text.contains(suit.symbol())
            {
                return Some(card);
            }
        }
    }
    None
}

/// Render the prompt: rules, situation, team roles, memory of cards seen,
/// and the legal set.
fn render_prompt(view: &SeatView, legal: &[Card]) -> String {
    let seat = view.seat;
    let me = &view.handles[seat as usize];
    let teammate = &view.handles[view.teammate() as usize];
    let my_team = team_of_seat(seat);

    let mut our_team = Vec::new();
    let mut their_team = Vec::new();
    for s in 0..4u8 {
        if team_of_seat(s) == my_team {
            our_team.push(view.handles[s as usize].clone());
        } else {
            their_team.push(view.handles[s as usize].clone());
        }
    }

    let hand = join_cards(&view.hand);
    let trick = if view.trick.is_empty() {
        "Empty (you lead)".to_string()
    } else {
        view.trick
            .iter()
            .map(|&(s, c)| format!("{}: {}", view.handles[s as usize], c))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let collected = (0..4usize)
        .map(|s| {
            let points: Vec<String> = view.collected[s]
                .iter()
                .filter(|c| c.is_scoring() || **c == crate::domain::DOUBLER)
                .map(|c| c.to_string())
                .collect();
            let listed = if points.is_empty() {
                "none".to_string()
            } else {
                points.join(", ")
            };
            format!("{}: {listed}", view.handles[s])
        })
        .collect::<Vec<_>>()
        .join("\n");

    let memory = CardMemory::from_view(view);
    let key_remaining = join_cards(&memory.key_cards_remaining());

    format!(
        "You are playing Gongzhu (Chinese Hearts), a trick-taking card game.\n\
         \n\
         GAME RULES:\n\
         - Follow suit if possible, otherwise play any card\n\
         - Highest card of the led suit wins the trick\n\
         - Scoring: Hearts are negative (-10 to -50), Q♠ is -100, J♦ is +100, \
         10♣ doubles your score or gives +50 if no other scoring cards\n\
         - \"Shooting the moon\" (getting all hearts) gives +200 points\n\
         - Game is played in teams: your team ({our}) vs opponents ({their})\n\
         \n\
         CURRENT SITUATION:\n\
         Your hand: {hand}\n\
         Current trick: {trick}\n\
         Your position: {me} (seat {seat_no})\n\
         Your teammate: {teammate}\n\
         \n\
         COLLECTED POINT CARDS SO FAR:\n\
         {collected}\n\
         \n\
         TEAM SCORES:\n\
         Your team: {our_score}, Opponents: {their_score}\n\
         \n\
         GAME MEMORY:\n\
         - Cards played so far: {played}/52\n\
         - Key cards still in play: {key_remaining}\n\
         \n\
         Valid cards you can play: {legal}\n\
         \n\
         Choose one card from the valid list. Consider avoiding penalty cards, \
         capturing J♦ when safe, your teammate's position, 10♣ doubling effects, \
         and whether anyone might be shooting the moon.\n\
         \n\
         Respond in this format:\n\
         <reasoning>\n\
         Brief strategic reasoning (1-2 sentences max)\n\
         </reasoning>\n\
         \n\
         <played_card>\n\
         [Card name, e.g., \"A♠\", \"5♥\", \"J♦\"]\n\
         </played_card>",
        our = our_team.join(", "),
        their = their_team.join(", "),
        hand = hand,
        trick = trick,
        me = me,
        seat_no = seat + 1,
        teammate = teammate,
        collected = collected,
        our_score = view.cumulative[my_team as usize],
        their_score = view.cumulative[1 - my_team as usize],
        played = memory.played_count(),
        key_remaining = key_remaining,
        legal = join_cards(legal),
    )
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
