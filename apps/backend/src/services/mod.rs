//! Service layer: session command handling over the pure domain.

pub mod events;
pub mod game_flow;

#[cfg(test)]
mod tests_game_flow;

pub use events::{GameEvent, RosterEntry, RoundOverPayload, SeatCollected, TeamSummary};
pub use game_flow::GameFlow;
