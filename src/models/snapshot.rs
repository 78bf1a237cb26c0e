use serde::Serialize;

use super::{GameOver, Player, Side};
use crate::game::MatchPhase;

/// Highlight state as the board widget draws it.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionView {
    pub selected_square: Option<String>,
    pub valid_moves: Vec<String>,
}

/// Read-only view of a match, produced after every transition.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub fen: String,
    pub layout: String,
    pub current_turn: Side,
    pub phase: MatchPhase,
    pub players: Vec<Player>,
    pub selection: SelectionView,
    pub in_check: bool,
    pub game_over: Option<GameOver>,
    pub orientation: Side,
}
