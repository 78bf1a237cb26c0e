//! Move legality and board state, delegated to the `chess` crate.
//!
//! The match never inspects a [`Board`] on its own beyond asking who owns a
//! square; every legality decision and every terminal flag comes from a
//! [`RulesOracle`].

use chess::{Board, BoardStatus, ChessMove, MoveGen, Piece, Square};

use super::utils::has_insufficient_material;
use crate::models::Side;

/// A move the rules accepted, with the flags of the resulting position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub position: Board,
    pub chess_move: ChessMove,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub is_draw: bool,
    pub is_check: bool,
}

/// Deterministic, side-effect-free rules of chess.
pub trait RulesOracle {
    fn initial_position(&self) -> Board {
        Board::default()
    }

    /// Legal destinations for whatever piece stands on `square`.
    /// Empty when the square is empty or belongs to the side not to move.
    fn legal_destinations(&self, position: &Board, square: Square) -> Vec<Square>;

    /// Applies `from -> to`, using `promotion` when a pawn reaches the last
    /// rank. `None` means the rules reject the move.
    fn apply_move(
        &self,
        position: &Board,
        from: Square,
        to: Square,
        promotion: Piece,
    ) -> Option<AppliedMove>;

    fn owner_of(&self, position: &Board, square: Square) -> Option<Side> {
        position.color_on(square).map(Side::from)
    }

    /// Piece placement field of the FEN, enough to redraw the board.
    fn render_key(&self, position: &Board) -> String {
        let fen = position.to_string();
        fen.split_whitespace().next().unwrap_or_default().to_string()
    }
}

/// Standard chess rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessOracle;

impl RulesOracle for ChessOracle {
    fn legal_destinations(&self, position: &Board, square: Square) -> Vec<Square> {
        let mut destinations = Vec::new();
        for chess_move in MoveGen::new_legal(position) {
            if chess_move.get_source() == square && !destinations.contains(&chess_move.get_dest()) {
                destinations.push(chess_move.get_dest());
            }
        }
        destinations
    }

    fn apply_move(
        &self,
        position: &Board,
        from: Square,
        to: Square,
        promotion: Piece,
    ) -> Option<AppliedMove> {
        let chess_move = MoveGen::new_legal(position).find(|m| {
            m.get_source() == from
                && m.get_dest() == to
                && m.get_promotion().map_or(true, |piece| piece == promotion)
        })?;

        let next = position.make_move_new(chess_move);
        let status = next.status();
        Some(AppliedMove {
            position: next,
            chess_move,
            is_checkmate: status == BoardStatus::Checkmate,
            is_stalemate: status == BoardStatus::Stalemate,
            is_draw: has_insufficient_material(&next),
            is_check: next.checkers().popcnt() > 0,
        })
    }
}
