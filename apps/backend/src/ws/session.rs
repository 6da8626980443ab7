//! Per-connection websocket session actor.
//!
//! A session owns one socket, keeps the connection alive with heartbeats,
//! and forwards parsed commands to the game server actor. It performs no
//! game logic itself.

use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::PlayerKey;
use crate::state::app_state::AppState;
use crate::ws::hub::{ClientCommand, Connect, Disconnected, GameServer, Outbound};
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let player = Uuid::new_v4();
    let session = WsSession::new(player, app_state.game_server.clone());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    /// Connection id; doubles as the player key for this seat.
    player: PlayerKey,
    server: Addr<GameServer>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(player: PlayerKey, server: Addr<GameServer>) -> Self {
        Self {
            player,
            server,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(player = %actor.player, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(player = %self.player, "[WS SESSION] started");
        self.server.do_send(Connect {
            player: self.player,
            addr: ctx.address().recipient(),
        });
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.server.do_send(Disconnected {
            player: self.player,
        });
        info!(player = %self.player, "[WS SESSION] stopped");
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) {
        Self::send_json(ctx, &msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.server.do_send(ClientCommand {
                        player: self.player,
                        msg: cmd,
                    }),
                    Err(err) => Self::send_json(
                        ctx,
                        &ServerMsg::Error {
                            code: "BAD_REQUEST".to_string(),
                            message: format!("malformed command: {err}"),
                        },
                    ),
                }
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(player = %self.player, error = %err, "[WS SESSION] protocol error");
                ctx.stop();
            }
        }
    }
}
