//! Decision providers for automated seats.
//!
//! - `RandomPlayer`: uniform-random legal card (seedable for tests)
//! - `Heuristic`: deterministic rules with difficulty tiers
//! - `LlmPlayer`: LLM-backed choice with guaranteed heuristic fallback
//! - `CardMemory`: public card-counting shared by providers

use std::sync::Arc;

pub mod heuristic;
pub mod llm;
pub mod memory;
pub mod providers;
mod random;
mod trait_def;

pub use heuristic::{Difficulty, Heuristic};
pub use llm::LlmPlayer;
pub use memory::CardMemory;
pub use random::RandomPlayer;
pub use trait_def::{AiError, AiPlayer};

use crate::config::bots::BotsConfig;
use crate::config::llm::LlmConfig;

/// Build the decision provider for one automated seat.
///
/// With LLM configuration present the seat runs the LLM-backed provider
/// (which embeds its own rule-based fallback); otherwise it runs the
/// heuristic at the configured difficulty.
pub fn create_bot(llm: Option<&LlmConfig>, bots: &BotsConfig) -> Arc<dyn AiPlayer> {
    match llm {
        Some(config) => Arc::new(LlmPlayer::from_config(config)),
        None => Arc::new(Heuristic::new(bots.difficulty, None)),
    }
}
