use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::ai::Difficulty;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Anthropic,
    Google,
    OpenRouter,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
            ProviderKind::OpenRouter => "openrouter",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-3-5-haiku-20241022",
            ProviderKind::Google => "gemini-1.5-flash",
            ProviderKind::OpenRouter => "anthropic/claude-3-haiku",
        }
    }

    fn api_key_env(self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::Google => "GOOGLE_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anthropic" => Ok(ProviderKind::Anthropic),
            "google" => Ok(ProviderKind::Google),
            "openrouter" => Ok(ProviderKind::OpenRouter),
            other => Err(format!("unknown LLM provider: {other:?}")),
        }
    }
}

/// Configuration for the LLM-backed decision provider.
///
/// Absent or unusable configuration is never fatal: bots simply run the
/// rule-based provider instead.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub kind: ProviderKind,
    pub model: String,
    pub api_key: String,
    /// Hard ceiling for one decision round trip.
    pub timeout: Duration,
    pub fallback_difficulty: Difficulty,
}

impl LlmConfig {
    /// Read `LLM_PROVIDER`, the provider's API key variable, and the
    /// optional `LLM_MODEL` / `LLM_TIMEOUT_MS` / `LLM_FALLBACK_DIFFICULTY`
    /// knobs. Returns `None` (with a warning) when the LLM path cannot be
    /// enabled.
    pub fn from_env() -> Option<Self> {
        let raw = std::env::var("LLM_PROVIDER").ok()?;
        let kind = match raw.parse::<ProviderKind>() {
            Ok(kind) => kind,
            Err(err) => {
                warn!(%err, "LLM disabled");
                return None;
            }
        };
        let Ok(api_key) = std::env::var(kind.api_key_env()) else {
            warn!(
                provider = kind.as_str(),
                missing = kind.api_key_env(),
                "LLM disabled: API key not configured"
            );
            return None;
        };

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| kind.default_model().to_string());
        let timeout = std::env::var("LLM_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(8000));
        let fallback_difficulty = std::env::var("LLM_FALLBACK_DIFFICULTY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Difficulty::Hard);

        Some(Self {
            kind,
            model,
            api_key,
            timeout,
            fallback_difficulty,
        })
    }
}
