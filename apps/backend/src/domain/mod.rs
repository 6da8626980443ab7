//! Domain layer: pure game logic types and helpers.

pub mod cards;
pub mod dealing;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod snapshot;
pub mod state;
pub mod teams;
pub mod tricks;

#[cfg(test)]
mod test_state_helpers;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use cards::{hand_has_suit, parse_card, Card, Rank, Suit, DOUBLER, GOAT, PIG};
pub use dealing::{deal, full_deck};
pub use player_view::SeatView;
pub use snapshot::PublicSnapshot;
pub use state::{GameSession, Phase, PlayerKey, Seat, SeatInfo, TeamId};
