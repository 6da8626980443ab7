//! Decision provider trait definition.

use std::fmt;

use async_trait::async_trait;

use crate::domain::player_view::SeatView;
use crate::domain::Card;
use crate::error::AppError;

/// Errors that can occur while a provider chooses a card.
#[derive(Debug)]
pub enum AiError {
    /// Provider encountered an internal error
    Internal(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// Trait for automated seat occupants.
///
/// Implementations receive the state visible to one seat and must return
/// a card from `view.legal_plays()`. The call is async because some
/// providers consult an external completion API; local providers resolve
/// immediately.
#[async_trait]
pub trait AiPlayer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Choose a card to play. Must be a member of `view.legal_plays()`.
    async fn choose_play(&self, view: &SeatView) -> Result<Card, AiError>;
}
