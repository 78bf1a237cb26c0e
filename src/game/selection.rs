use chess::Square;
use log::{debug, error};

use super::chess_match::{ChessMatch, MoveOutcome};
use super::oracle::RulesOracle;
use crate::models::Side;

/// Transient signal for the person at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    NotYourTurn,
    NotYourPiece,
    NoLegalMoves,
    MoveRejected,
    Check,
}

impl Advisory {
    pub fn code(self) -> &'static str {
        match self {
            Advisory::NotYourTurn => "not_your_turn",
            Advisory::NotYourPiece => "not_your_piece",
            Advisory::NoLegalMoves => "no_legal_moves",
            Advisory::MoveRejected => "move_rejected",
            Advisory::Check => "check",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Advisory::NotYourTurn => "It's not your turn!",
            Advisory::NotYourPiece => "That's not your piece!",
            Advisory::NoLegalMoves => "That piece has no legal moves.",
            Advisory::MoveRejected => "That move could not be played.",
            Advisory::Check => "Check!",
        }
    }
}

/// The highlighted piece and where it may go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Square>,
    valid_moves: Vec<Square>,
}

impl Selection {
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Square] {
        &self.valid_moves
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing happened, the match is over.
    Ignored,
    Rejected(Advisory),
    Selected { square: Square, destinations: usize },
    Moved(MoveOutcome),
    Cleared,
}

impl ClickOutcome {
    pub fn advisory(&self) -> Option<Advisory> {
        match self {
            ClickOutcome::Rejected(advisory) => Some(*advisory),
            ClickOutcome::Selected { destinations: 0, .. } => Some(Advisory::NoLegalMoves),
            ClickOutcome::Moved(outcome) if outcome.in_check && outcome.game_over.is_none() => {
                Some(Advisory::Check)
            }
            _ => None,
        }
    }
}

impl Selection {
    /// Turns a click on `square` into a selection change or a move.
    ///
    /// `actor` is the side the clicking person plays; `None` means a shared
    /// board where whoever clicks acts for the side to move.
    pub fn on_square_click<O: RulesOracle>(
        &mut self,
        chess_match: &mut ChessMatch,
        oracle: &O,
        square: Square,
        actor: Option<Side>,
    ) -> ClickOutcome {
        if !chess_match.is_in_progress() {
            return ClickOutcome::Ignored;
        }
        let to_move = chess_match.current_turn();

        if actor.is_some_and(|side| side != to_move) {
            debug!("{:?} clicked {} on {}'s turn", actor, square, to_move);
            return ClickOutcome::Rejected(Advisory::NotYourTurn);
        }

        if let Some(from) = self.selected {
            if self.valid_moves.contains(&square) {
                return match chess_match.commit_move(oracle, from, square) {
                    Ok(outcome) => {
                        self.clear();
                        ClickOutcome::Moved(outcome)
                    }
                    Err(e) => {
                        error!("Selected move {}{} failed: {}", from, square, e);
                        ClickOutcome::Rejected(Advisory::MoveRejected)
                    }
                };
            }
        }

        match oracle.owner_of(chess_match.position(), square) {
            Some(owner) if owner == to_move => {
                self.selected = Some(square);
                self.valid_moves = oracle.legal_destinations(chess_match.position(), square);
                ClickOutcome::Selected {
                    square,
                    destinations: self.valid_moves.len(),
                }
            }
            Some(_) => {
                self.clear();
                debug!("{} clicked an opposing piece on {}", to_move, square);
                ClickOutcome::Rejected(Advisory::NotYourPiece)
            }
            None => {
                self.clear();
                ClickOutcome::Cleared
            }
        }
    }
}
