//! Websocket transport: per-connection session actors and the game
//! server actor whose mailbox serializes all session commands.

pub mod hub;
pub mod protocol;
pub mod session;
