//! Domain-level error type used across services and transport.
//!
//! This error type is HTTP- and transport-agnostic. Handlers should return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failure kinds for game commands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Seat tried to act when it is not its turn.
    OutOfTurn,
    /// Played card is not in the seat's hand.
    CardNotInHand,
    /// Seat holds the led suit but played something else.
    MustFollowSuit,
    /// Command does not apply to the current session phase.
    PhaseMismatch,
    /// Start requested without any human-capable seat.
    NoHumanSeat,
    /// Continue requested without a team-assigned session.
    NoSessionToContinue,
    /// Session requires exactly 4 seated players.
    WrongPlayerCount,
    /// Unparseable card token.
    ParseCard,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input/user validation or business rule violation.
    Validation(ValidationKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn parse_card(token: &str) -> Self {
        Self::Validation(
            ValidationKind::ParseCard,
            format!("invalid card token: {token:?}"),
        )
    }

    pub fn kind(&self) -> &ValidationKind {
        match self {
            DomainError::Validation(kind, _) => kind,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            DomainError::Validation(_, d) => d,
        }
    }
}
