use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Player, Side, TimeControl};
use crate::error::SetupError;

/// What the setup form posts.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SetupRequest {
    pub player_a: String,
    pub player_b: String,
    pub minutes: u32,
}

/// The one-shot handoff from the setup screen to the match screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetupRecord {
    pub player_a: Player,
    pub player_b: Player,
    pub current_turn: Side,
}

impl SetupRecord {
    /// Builds a record with a fair coin flip for colors.
    pub fn from_request(request: &SetupRequest) -> Result<Self, SetupError> {
        Self::from_request_with(request, &mut rand::thread_rng())
    }

    pub fn from_request_with<R: Rng>(
        request: &SetupRequest,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        let name_a = request.player_a.trim();
        let name_b = request.player_b.trim();
        if name_a.is_empty() {
            return Err(SetupError::EmptyName('A'));
        }
        if name_b.is_empty() {
            return Err(SetupError::EmptyName('B'));
        }
        let seconds = TimeControl::from_minutes(request.minutes)?.seconds();

        let color_a = if rng.gen_bool(0.5) { Side::White } else { Side::Black };

        Ok(Self {
            player_a: Player::new(name_a, color_a, seconds),
            player_b: Player::new(name_b, color_a.opponent(), seconds),
            current_turn: Side::White,
        })
    }

    /// Rejects records that could not have come from `from_request`.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.player_a.name.trim().is_empty() {
            return Err(SetupError::EmptyName('A'));
        }
        if self.player_b.name.trim().is_empty() {
            return Err(SetupError::EmptyName('B'));
        }
        if self.player_a.color == self.player_b.color {
            return Err(SetupError::SameColor(self.player_a.color));
        }
        for player in [&self.player_a, &self.player_b] {
            if player.time_left == 0 {
                return Err(SetupError::NoTime(player.name.clone()));
            }
        }
        if self.current_turn != Side::White {
            return Err(SetupError::WrongFirstTurn(self.current_turn));
        }
        Ok(())
    }
}
