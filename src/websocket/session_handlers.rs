use std::str::FromStr;

use actix::ActorContext;
use actix_web_actors::ws;
use chess::Square;
use log::{debug, info, warn};

use super::handler::MatchSession;
use crate::game::ClickOutcome;
use crate::models::{ClientMessage, ServerMessage};

/// Where the page goes when the match screen is left.
pub const SETUP_PAGE: &str = "/";

impl MatchSession {
    pub fn handle_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match msg.message_type.as_str() {
            "select_square" => self.handle_select_square(msg, ctx),
            "resign" => self.handle_resign(ctx),
            "flip_orientation" => self.handle_flip(ctx),
            "go_home" | "new_game" => self.handle_leave(msg, ctx),
            "sync" => self.publish(ctx),
            _ => {
                info!("Unknown message type: {}", msg.message_type);
                self.send(
                    &ServerMessage::error(format!("Unknown message type: {}", msg.message_type)),
                    ctx,
                );
            }
        }
    }

    pub fn handle_select_square(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        let square_str = match &msg.square {
            Some(s) => s.to_lowercase(),
            None => {
                warn!("No square provided");
                self.send(&ServerMessage::error("No square provided"), ctx);
                return;
            }
        };
        let square = match Square::from_str(&square_str) {
            Ok(s) => s,
            Err(_) => {
                warn!("Invalid square format: {}", square_str);
                self.send(&ServerMessage::error("Invalid square format"), ctx);
                return;
            }
        };

        let outcome = self.engine.select_square(square, msg.side);
        debug!("Click on {} -> {:?}", square, outcome);
        if outcome == ClickOutcome::Ignored {
            return;
        }

        let mut response = ServerMessage::snapshot(self.engine.snapshot(self.orientation));
        if let Some(advisory) = outcome.advisory() {
            response.advisory = Some(advisory.code().to_string());
            response.advisory_text = Some(advisory.text().to_string());
        }
        self.send(&response, ctx);

        if self.engine.is_over() {
            self.stop_clock(ctx);
        }
    }

    pub fn handle_resign(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        match self.engine.resign() {
            Some(game_over) => {
                info!("Session {}: {}", self.id, game_over.message);
                self.stop_clock(ctx);
                self.publish(ctx);
            }
            None => debug!("Resign ignored, match is already over"),
        }
    }

    pub fn handle_flip(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        self.orientation = self.orientation.opponent();
        self.publish(ctx);
    }

    /// `go_home` and `new_game` both tear the match down and send the page
    /// back to setup. The handoff record was consumed when this session
    /// started, so nothing is left to delete.
    pub fn handle_leave(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        info!("Session {} leaving match ({})", self.id, msg.message_type);
        self.stop_clock(ctx);
        self.send(&ServerMessage::redirect(SETUP_PAGE), ctx);
        ctx.close(None);
        ctx.stop();
    }
}
