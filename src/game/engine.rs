use std::time::Instant;

use chess::Square;

use super::chess_match::ChessMatch;
use super::clock::{Clock, TickOutcome};
use super::oracle::{ChessOracle, RulesOracle};
use super::selection::{ClickOutcome, Selection};
use crate::models::{GameOver, SelectionView, SetupRecord, Side, Snapshot};

/// Sole owner of one match: its state, its selection and its clock.
///
/// Every gesture and every clock wake-up goes through `&mut self`, so a
/// tick never observes a half-applied move.
pub struct MatchEngine<O = ChessOracle> {
    oracle: O,
    chess_match: ChessMatch,
    selection: Selection,
    clock: Clock,
}

impl MatchEngine<ChessOracle> {
    pub fn new(record: SetupRecord, now: Instant) -> Self {
        Self::with_oracle(ChessOracle, record, now)
    }
}

impl<O: RulesOracle> MatchEngine<O> {
    pub fn with_oracle(oracle: O, record: SetupRecord, now: Instant) -> Self {
        let chess_match = ChessMatch::new_match(&oracle, record);
        Self::from_match(oracle, chess_match, now)
    }

    pub fn from_match(oracle: O, chess_match: ChessMatch, now: Instant) -> Self {
        Self {
            oracle,
            chess_match,
            selection: Selection::default(),
            clock: Clock::start(now),
        }
    }

    pub fn chess_match(&self) -> &ChessMatch {
        &self.chess_match
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_over(&self) -> bool {
        self.chess_match.game_over().is_some()
    }

    pub fn select_square(&mut self, square: Square, actor: Option<Side>) -> ClickOutcome {
        self.selection
            .on_square_click(&mut self.chess_match, &self.oracle, square, actor)
    }

    pub fn resign(&mut self) -> Option<GameOver> {
        let game_over = self.chess_match.resign()?;
        self.selection.clear();
        Some(game_over)
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let outcome = self.clock.tick(&mut self.chess_match, now);
        if outcome.timeout.is_some() {
            self.selection.clear();
        }
        outcome
    }

    pub fn snapshot(&self, orientation: Side) -> Snapshot {
        let position = self.chess_match.position();
        Snapshot {
            fen: position.to_string(),
            layout: self.oracle.render_key(position),
            current_turn: self.chess_match.current_turn(),
            phase: self.chess_match.phase(),
            players: self.chess_match.players().into_iter().cloned().collect(),
            selection: SelectionView {
                selected_square: self.selection.selected().map(|s| s.to_string()),
                valid_moves: self
                    .selection
                    .valid_moves()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            in_check: self.chess_match.in_check(),
            game_over: self.chess_match.game_over().cloned(),
            orientation,
        }
    }
}
