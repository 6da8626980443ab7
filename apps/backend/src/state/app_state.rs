use actix::Addr;

use crate::ws::hub::GameServer;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Address of the game server actor; all session commands go through it
    pub game_server: Addr<GameServer>,
}

impl AppState {
    pub fn new(game_server: Addr<GameServer>) -> Self {
        Self { game_server }
    }
}
