use std::time::Duration;

use tracing::warn;

use crate::ai::Difficulty;

/// Defaults for automated seats filled in at game start.
#[derive(Debug, Clone)]
pub struct BotsConfig {
    pub difficulty: Difficulty,
    /// Deferred think-time before a bot turn is processed.
    pub think_time: Duration,
}

impl Default for BotsConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            think_time: Duration::from_millis(1000),
        }
    }
}

impl BotsConfig {
    /// Read `BOT_DIFFICULTY` / `BOT_THINK_MS`; unparseable values fall
    /// back to the defaults with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("BOT_DIFFICULTY") {
            match raw.parse() {
                Ok(difficulty) => config.difficulty = difficulty,
                Err(err) => warn!(%err, "ignoring BOT_DIFFICULTY"),
            }
        }
        if let Ok(raw) = std::env::var("BOT_THINK_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.think_time = Duration::from_millis(ms),
                Err(_) => warn!(value = %raw, "ignoring non-numeric BOT_THINK_MS"),
            }
        }
        config
    }
}
