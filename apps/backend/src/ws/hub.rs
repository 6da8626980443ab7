//! The game server actor: the single serialized command queue.
//!
//! Every inbound command (register, start, continue, play, disconnect)
//! is a mailbox message and runs to completion, including trick
//! resolution and scoring, before the next is admitted. Bot turns
//! re-enter the same mailbox as deferred messages after a think-time
//! delay, and their plays pass the identical validation as human plays.
//! The only suspension point is an LLM decision future, which holds no
//! borrow of shared state and re-enters the mailbox with its card.

use std::collections::HashMap;
use std::sync::Arc;

use actix::prelude::*;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::{self, AiPlayer};
use crate::config::bots::BotsConfig;
use crate::config::llm::LlmConfig;
use crate::domain::{Card, PlayerKey, Seat};
use crate::services::events::{GameEvent, RosterEntry};
use crate::services::game_flow::GameFlow;
use crate::ws::protocol::{ClientMsg, ServerMsg};

#[derive(Message)]
#[rtype(result = "()")]
pub struct Outbound(pub ServerMsg);

#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub player: PlayerKey,
    pub addr: Recipient<Outbound>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnected {
    pub player: PlayerKey,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ClientCommand {
    pub player: PlayerKey,
    pub msg: ClientMsg,
}

/// Deferred bot continuation. The token invalidates continuations that
/// were scheduled before a later state change.
#[derive(Message)]
#[rtype(result = "()")]
struct BotTurn {
    token: u64,
}

pub struct GameServer {
    flow: GameFlow,
    connections: HashMap<PlayerKey, Recipient<Outbound>>,
    bots: HashMap<PlayerKey, Arc<dyn AiPlayer>>,
    bots_config: BotsConfig,
    llm_config: Option<LlmConfig>,
    turn_token: u64,
}

impl GameServer {
    pub fn new(bots_config: BotsConfig, llm_config: Option<LlmConfig>) -> Self {
        Self {
            flow: GameFlow::new(),
            connections: HashMap::new(),
            bots: HashMap::new(),
            bots_config,
            llm_config,
            turn_token: 0,
        }
    }

    fn send_to(&self, player: PlayerKey, msg: ServerMsg) {
        // Bots and departed players have no connection; drop silently.
        if let Some(addr) = self.connections.get(&player) {
            addr.do_send(Outbound(msg));
        }
    }

    fn broadcast(&self, msg: &ServerMsg) {
        for addr in self.connections.values() {
            addr.do_send(Outbound(msg.clone()));
        }
    }

    fn dispatch(&self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Roster(players) => self.broadcast(&ServerMsg::Roster { players }),
                GameEvent::Hand { to, cards } => self.send_to(to, ServerMsg::Hand { cards }),
                GameEvent::Snapshot(snapshot) => {
                    self.broadcast(&ServerMsg::GameState { snapshot })
                }
                GameEvent::InvalidPlay { to, card, reason } => {
                    self.send_to(to, ServerMsg::InvalidPlay { card, reason })
                }
                GameEvent::Collected(piles) => self.broadcast(&ServerMsg::Collected { piles }),
                GameEvent::RoundOver(payload) => self.broadcast(&ServerMsg::RoundOver(payload)),
                GameEvent::Rejected { to, code, reason } => self.send_to(
                    to,
                    ServerMsg::Error {
                        code: code.to_string(),
                        message: reason,
                    },
                ),
            }
        }
    }

    /// Build roster entries plus decision providers for the open seats.
    fn make_bots(&mut self, count: usize) -> Vec<RosterEntry> {
        self.bots.clear();
        (0..count)
            .map(|_| {
                let player = Uuid::new_v4();
                let id = player.simple().to_string();
                self.bots
                    .insert(player, ai::create_bot(self.llm_config.as_ref(), &self.bots_config));
                RosterEntry {
                    player_id: player,
                    handle: format!("AI {}", &id[..4]),
                    is_bot: true,
                }
            })
            .collect()
    }

    /// After any accepted session mutation: invalidate pending bot
    /// continuations and, when a bot is to act, schedule its turn.
    fn schedule_bots(&mut self, ctx: &mut Context<Self>) {
        self.turn_token += 1;
        if self.flow.current_bot_turn().is_some() {
            let token = self.turn_token;
            ctx.notify_later(BotTurn { token }, self.bots_config.think_time);
        }
    }

    fn apply_bot_play(&mut self, seat: Seat, card: Card, ctx: &mut Context<Self>) {
        let events = self.flow.apply_play(seat, card);
        self.dispatch(events);
        self.schedule_bots(ctx);
    }
}

impl Actor for GameServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        info!(
            llm = self.llm_config.as_ref().map(|c| c.kind.as_str()),
            difficulty = self.bots_config.difficulty.as_str(),
            "[GAME SERVER] started"
        );
    }
}

impl Handler<Connect> for GameServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _ctx: &mut Self::Context) {
        self.connections.insert(msg.player, msg.addr);
    }
}

impl Handler<Disconnected> for GameServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnected, _ctx: &mut Self::Context) {
        self.connections.remove(&msg.player);
        // The seat state survives until the next start/continue.
        let events = self.flow.disconnect(msg.player);
        self.dispatch(events);
    }
}

impl Handler<ClientCommand> for GameServer {
    type Result = ();

    fn handle(&mut self, msg: ClientCommand, ctx: &mut Self::Context) {
        let player = msg.player;
        match msg.msg {
            ClientMsg::Register { handle } => {
                let events = self.flow.register(player, handle);
                self.dispatch(events);
            }
            ClientMsg::Start => {
                let bots = match self.flow.missing_seats() {
                    Ok(count) => self.make_bots(count),
                    Err(err) => {
                        let events = vec![GameEvent::Rejected {
                            to: player,
                            code: "NO_HUMAN_SEAT",
                            reason: err.detail().to_string(),
                        }];
                        self.dispatch(events);
                        return;
                    }
                };
                match self.flow.start(bots) {
                    Ok(events) => {
                        self.dispatch(events);
                        self.schedule_bots(ctx);
                    }
                    Err(err) => self.dispatch(vec![GameEvent::Rejected {
                        to: player,
                        code: "START_REJECTED",
                        reason: err.detail().to_string(),
                    }]),
                }
            }
            ClientMsg::Continue => match self.flow.continue_round() {
                Ok(events) => {
                    self.dispatch(events);
                    self.schedule_bots(ctx);
                }
                Err(err) => self.dispatch(vec![GameEvent::Rejected {
                    to: player,
                    code: "CONTINUE_REJECTED",
                    reason: err.detail().to_string(),
                }]),
            },
            ClientMsg::Play { card } => {
                let events = self.flow.play(player, &card);
                let accepted = !events.iter().any(|e| {
                    matches!(
                        e,
                        GameEvent::InvalidPlay { .. } | GameEvent::Rejected { .. }
                    )
                });
                self.dispatch(events);
                if accepted {
                    self.schedule_bots(ctx);
                }
            }
        }
    }
}

impl Handler<BotTurn> for GameServer {
    type Result = ();

    fn handle(&mut self, msg: BotTurn, ctx: &mut Self::Context) {
        if msg.token != self.turn_token {
            return;
        }
        let Some((seat, player)) = self.flow.current_bot_turn() else {
            return;
        };
        let Some(view) = self.flow.view_for(seat) else {
            return;
        };
        let Some(provider) = self.bots.get(&player).cloned() else {
            warn!(seat, "bot seat has no decision provider, playing first legal card");
            if let Some(card) = self.flow.fallback_card(seat) {
                self.apply_bot_play(seat, card, ctx);
            }
            return;
        };

        // The decision may await an external completion API; run it off
        // the mailbox and re-enter with the chosen card. The token guards
        // against a start/continue landing while the future is in flight.
        let token = msg.token;
        let fut = async move { provider.choose_play(&view).await };
        ctx.spawn(fut.into_actor(self).map(move |decision, actor, ctx| {
            if token != actor.turn_token {
                return;
            }
            let card = match decision {
                Ok(card) => Some(card),
                Err(err) => {
                    warn!(seat, %err, "decision provider failed, playing first legal card");
                    actor.flow.fallback_card(seat)
                }
            };
            if let Some(card) = card {
                actor.apply_bot_play(seat, card, ctx);
            }
        }));
    }
}
