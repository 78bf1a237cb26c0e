use std::time::Instant;

use actix::{Actor, ActorContext, AsyncContext, Running, SpawnHandle, StreamHandler};
use actix_web_actors::ws;
use log::{info, warn};

use crate::game::{Clock, MatchEngine};
use crate::models::{ClientMessage, ServerMessage, SetupRecord, Side};

/// WebSocket session for one match.
///
/// The actor is the single owner of the match: gestures and clock
/// wake-ups are both handled on its mailbox, one at a time.
pub struct MatchSession {
    pub id: String,
    pub(crate) engine: MatchEngine,
    pub(crate) orientation: Side,
    clock_handle: Option<SpawnHandle>,
}

impl MatchSession {
    pub fn new(id: String, record: SetupRecord) -> Self {
        Self {
            id,
            engine: MatchEngine::new(record, Instant::now()),
            orientation: Side::White,
            clock_handle: None,
        }
    }

    pub(crate) fn send(&self, message: &ServerMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(message) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                warn!("Failed to serialize {} message: {}", message.message_type, e);
                ctx.text("{\"message_type\": \"error\", \"error\": \"Internal server error\"}");
            }
        }
    }

    pub(crate) fn publish(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let snapshot = self.engine.snapshot(self.orientation);
        self.send(&ServerMessage::snapshot(snapshot), ctx);
    }

    fn start_clock(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        let handle = ctx.run_interval(Clock::period(), |session, ctx| {
            let outcome = session.engine.tick(Instant::now());
            if outcome.changed() {
                session.publish(ctx);
            }
            if session.engine.is_over() {
                session.stop_clock(ctx);
            }
        });
        self.clock_handle = Some(handle);
    }

    /// Cancels the recurring tick. Safe to call more than once.
    pub(crate) fn stop_clock(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        if let Some(handle) = self.clock_handle.take() {
            ctx.cancel_future(handle);
            info!("Clock stopped for session {}", self.id);
        }
    }
}

impl Actor for MatchSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("WebSocket connection started: {}", self.id);
        self.start_clock(ctx);
        self.publish(ctx);
    }

    fn stopping(&mut self, ctx: &mut Self::Context) -> Running {
        self.stop_clock(ctx);
        info!("WebSocket connection closed: {}", self.id);
        Running::Stop
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for MatchSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Text(text)) => {
                match serde_json::from_str::<ClientMessage>(text.as_ref()) {
                    Ok(client_msg) => {
                        self.handle_message(client_msg, ctx);
                    }
                    Err(e) => {
                        warn!("Error parsing client message: {}", e);
                        self.send(&ServerMessage::error(format!("Invalid message format: {}", e)), ctx);
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                warn!("Binary messages are not supported");
                self.send(&ServerMessage::error("Binary messages are not supported"), ctx);
            }
            Ok(ws::Message::Close(reason)) => {
                info!("Connection closed: {:?}", reason);
                ctx.close(reason);
                ctx.stop();
            }
            _ => {
                ctx.stop();
            }
        }
    }
}
