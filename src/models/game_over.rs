use serde::{Deserialize, Serialize};

use super::{Player, Side};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOverKind {
    Checkmate,
    Stalemate,
    Draw,
    /// Flag fall, and resignation, which ends the game the same way.
    Timeout,
}

/// The terminal result of a match. Once a match holds one it never
/// changes again.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameOver {
    pub kind: GameOverKind,
    pub winner_name: Option<String>,
    pub winner_color: Option<Side>,
    pub resigned: bool,
    pub message: String,
}

impl GameOver {
    pub fn checkmate(winner: &Player) -> Self {
        Self {
            kind: GameOverKind::Checkmate,
            winner_name: Some(winner.name.clone()),
            winner_color: Some(winner.color),
            resigned: false,
            message: format!("Checkmate! {} wins.", winner.name),
        }
    }

    pub fn stalemate() -> Self {
        Self {
            kind: GameOverKind::Stalemate,
            winner_name: None,
            winner_color: None,
            resigned: false,
            message: "Stalemate! The game is a draw.".to_string(),
        }
    }

    pub fn insufficient_material() -> Self {
        Self {
            kind: GameOverKind::Draw,
            winner_name: None,
            winner_color: None,
            resigned: false,
            message: "Draw: neither side can checkmate.".to_string(),
        }
    }

    pub fn timeout(loser: &Player, winner: &Player) -> Self {
        Self {
            kind: GameOverKind::Timeout,
            winner_name: Some(winner.name.clone()),
            winner_color: Some(winner.color),
            resigned: false,
            message: format!("{} ran out of time. {} wins!", loser.name, winner.name),
        }
    }

    pub fn resignation(loser: &Player, winner: &Player) -> Self {
        Self {
            kind: GameOverKind::Timeout,
            winner_name: Some(winner.name.clone()),
            winner_color: Some(winner.color),
            resigned: true,
            message: format!("{} resigned. {} wins!", loser.name, winner.name),
        }
    }
}
