use chess::{Board, Piece, Square};
use log::{debug, error, info};
use serde::Serialize;

use super::oracle::RulesOracle;
use crate::error::MoveError;
use crate::models::{GameOver, GameOverKind, Player, SetupRecord, Side};

/// Lifecycle of a match. Every terminal phase is absorbing.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Setup,
    InProgress,
    Checkmate,
    Stalemate,
    Draw,
    Timeout,
}

impl From<GameOverKind> for MatchPhase {
    fn from(kind: GameOverKind) -> Self {
        match kind {
            GameOverKind::Checkmate => MatchPhase::Checkmate,
            GameOverKind::Stalemate => MatchPhase::Stalemate,
            GameOverKind::Draw => MatchPhase::Draw,
            GameOverKind::Timeout => MatchPhase::Timeout,
        }
    }
}

/// Result of one accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mover: Side,
    pub in_check: bool,
    pub game_over: Option<GameOver>,
}

/// Result of charging the side to move for one second.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockCharge {
    Charged { side: Side, time_left: u32 },
    Flagged(GameOver),
    Ignored,
}

/// The authoritative state of one game: players, position, turn and result.
#[derive(Debug, Clone)]
pub struct ChessMatch {
    player_a: Player,
    player_b: Player,
    current_turn: Side,
    position: Board,
    in_check: bool,
    phase: MatchPhase,
    game_over: Option<GameOver>,
}

impl ChessMatch {
    /// Loads players in the `Setup` phase. Call [`ChessMatch::start`] to play.
    pub fn setup(player_a: Player, player_b: Player, position: Board) -> Self {
        Self {
            player_a,
            player_b,
            current_turn: position.side_to_move().into(),
            position,
            in_check: position.checkers().popcnt() > 0,
            phase: MatchPhase::Setup,
            game_over: None,
        }
    }

    /// A fresh game from the standard start position, white to move.
    pub fn new_match<O: RulesOracle>(oracle: &O, record: SetupRecord) -> Self {
        let mut chess_match = Self::setup(record.player_a, record.player_b, oracle.initial_position());
        chess_match.start();
        chess_match
    }

    /// A game that picks up from an arbitrary position.
    pub fn with_position(player_a: Player, player_b: Player, position: Board) -> Self {
        let mut chess_match = Self::setup(player_a, player_b, position);
        chess_match.start();
        chess_match
    }

    pub fn start(&mut self) {
        if self.phase != MatchPhase::Setup {
            return;
        }
        self.phase = MatchPhase::InProgress;
        info!(
            "Match started: {} ({}) vs {} ({}), {} to move",
            self.player_a.name,
            self.player_a.color,
            self.player_b.name,
            self.player_b.color,
            self.current_turn
        );
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_in_progress(&self) -> bool {
        self.phase == MatchPhase::InProgress
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        self.game_over.as_ref()
    }

    pub fn current_turn(&self) -> Side {
        self.current_turn
    }

    pub fn position(&self) -> &Board {
        &self.position
    }

    pub fn in_check(&self) -> bool {
        self.in_check
    }

    pub fn players(&self) -> [&Player; 2] {
        [&self.player_a, &self.player_b]
    }

    pub fn player(&self, side: Side) -> &Player {
        if self.player_a.color == side {
            &self.player_a
        } else {
            &self.player_b
        }
    }

    fn player_mut(&mut self, side: Side) -> &mut Player {
        if self.player_a.color == side {
            &mut self.player_a
        } else {
            &mut self.player_b
        }
    }

    /// The player whose turn it is.
    pub fn active_player(&self) -> &Player {
        self.player(self.current_turn)
    }

    pub fn inactive_player(&self) -> &Player {
        self.player(self.current_turn.opponent())
    }

    fn finish(&mut self, game_over: GameOver) -> GameOver {
        info!("Match over ({:?}): {}", game_over.kind, game_over.message);
        self.phase = game_over.kind.into();
        self.game_over = Some(game_over.clone());
        game_over
    }

    /// Plays `from -> to`, always promoting to a queen.
    ///
    /// On success the turn passes to the other side and the new position is
    /// checked for checkmate, then stalemate or another draw. Check alone
    /// never ends the game.
    pub fn commit_move<O: RulesOracle>(
        &mut self,
        oracle: &O,
        from: Square,
        to: Square,
    ) -> Result<MoveOutcome, MoveError> {
        if !self.is_in_progress() {
            return Err(MoveError::NotInProgress);
        }
        let applied = match oracle.apply_move(&self.position, from, to, Piece::Queen) {
            Some(applied) => applied,
            None => {
                error!("Rules rejected {}{} for {}", from, to, self.current_turn);
                return Err(MoveError::Rejected { from, to });
            }
        };

        let mover = self.current_turn;
        self.position = applied.position;
        self.current_turn = mover.opponent();
        self.in_check = applied.is_check;
        debug_assert_eq!(Side::from(self.position.side_to_move()), self.current_turn);
        info!("{} played {}", mover, applied.chess_move);

        let game_over = if applied.is_checkmate {
            let winner = self.inactive_player().clone();
            Some(self.finish(GameOver::checkmate(&winner)))
        } else if applied.is_stalemate {
            Some(self.finish(GameOver::stalemate()))
        } else if applied.is_draw {
            Some(self.finish(GameOver::insufficient_material()))
        } else {
            if applied.is_check {
                debug!("{} is in check", self.current_turn);
            }
            None
        };

        Ok(MoveOutcome {
            mover,
            in_check: applied.is_check,
            game_over,
        })
    }

    /// The side to move gives up and the other side wins.
    pub fn resign(&mut self) -> Option<GameOver> {
        if !self.is_in_progress() {
            return None;
        }
        let loser = self.active_player().clone();
        let winner = self.inactive_player().clone();
        Some(self.finish(GameOver::resignation(&loser, &winner)))
    }

    /// Takes one second from the side to move.
    ///
    /// Reaching zero is not a loss by itself: the player keeps the move
    /// with `0` on the clock, and only the next charge while already at
    /// zero flags them. So the flag falls one whole second after the
    /// display reads zero, and `time_left` never goes below zero.
    pub(crate) fn charge_second(&mut self) -> ClockCharge {
        if !self.is_in_progress() {
            return ClockCharge::Ignored;
        }
        let side = self.current_turn;
        let player = self.player_mut(side);
        match player.time_left.checked_sub(1) {
            Some(time_left) => {
                player.time_left = time_left;
                ClockCharge::Charged { side, time_left }
            }
            None => {
                let loser = self.active_player().clone();
                let winner = self.inactive_player().clone();
                ClockCharge::Flagged(self.finish(GameOver::timeout(&loser, &winner)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::oracle::ChessOracle;
    use std::str::FromStr;

    fn sq(name: &str) -> Square {
        Square::from_str(name).unwrap()
    }

    fn record() -> SetupRecord {
        SetupRecord {
            player_a: Player::new("Ann", Side::Black, 300),
            player_b: Player::new("Bob", Side::White, 300),
            current_turn: Side::White,
        }
    }

    #[test]
    fn new_match_starts_with_white_to_move() {
        let chess_match = ChessMatch::new_match(&ChessOracle, record());
        assert_eq!(chess_match.phase(), MatchPhase::InProgress);
        assert_eq!(chess_match.current_turn(), Side::White);
        assert_eq!(chess_match.active_player().name, "Bob");
        assert_eq!(chess_match.inactive_player().name, "Ann");
        assert!(chess_match.game_over().is_none());
    }

    #[test]
    fn setup_phase_ignores_moves_until_started() {
        let record = record();
        let mut chess_match = ChessMatch::setup(record.player_a, record.player_b, Board::default());
        assert_eq!(
            chess_match.commit_move(&ChessOracle, sq("e2"), sq("e4")),
            Err(MoveError::NotInProgress)
        );
        assert_eq!(chess_match.charge_second(), ClockCharge::Ignored);
        chess_match.start();
        assert!(chess_match.commit_move(&ChessOracle, sq("e2"), sq("e4")).is_ok());
    }

    #[test]
    fn accepted_moves_alternate_the_turn() {
        let mut chess_match = ChessMatch::new_match(&ChessOracle, record());
        let moves = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")];
        let mut expected = Side::White;
        for (from, to) in moves {
            assert_eq!(chess_match.current_turn(), expected);
            let outcome = chess_match.commit_move(&ChessOracle, sq(from), sq(to)).unwrap();
            assert_eq!(outcome.mover, expected);
            expected = expected.opponent();
        }
        assert_eq!(chess_match.current_turn(), Side::White);
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut chess_match = ChessMatch::new_match(&ChessOracle, record());
        let before = *chess_match.position();
        assert_eq!(
            chess_match.commit_move(&ChessOracle, sq("e7"), sq("e5")),
            Err(MoveError::Rejected { from: sq("e7"), to: sq("e5") })
        );
        assert_eq!(*chess_match.position(), before);
        assert_eq!(chess_match.current_turn(), Side::White);
    }

    #[test]
    fn check_is_advisory_only() {
        let mut chess_match = ChessMatch::new_match(&ChessOracle, record());
        for (from, to) in [("e2", "e4"), ("f7", "f6"), ("d1", "h5")] {
            chess_match.commit_move(&ChessOracle, sq(from), sq(to)).unwrap();
        }
        assert!(chess_match.in_check());
        assert!(chess_match.is_in_progress());
    }

    #[test]
    fn resignation_goes_to_the_waiting_player() {
        let mut chess_match = ChessMatch::new_match(&ChessOracle, record());
        chess_match.commit_move(&ChessOracle, sq("e2"), sq("e4")).unwrap();
        let over = chess_match.resign().unwrap();
        assert_eq!(over.kind, GameOverKind::Timeout);
        assert!(over.resigned);
        assert_eq!(over.winner_name.as_deref(), Some("Bob"));
        assert!(over.message.contains("Ann resigned"));
        assert_eq!(chess_match.resign(), None);
        assert_eq!(chess_match.phase(), MatchPhase::Timeout);
    }

    #[test]
    fn charging_stops_at_zero_then_flags() {
        let mut chess_match = ChessMatch::with_position(
            Player::new("Ann", Side::White, 1),
            Player::new("Bob", Side::Black, 1),
            Board::default(),
        );
        assert_eq!(
            chess_match.charge_second(),
            ClockCharge::Charged { side: Side::White, time_left: 0 }
        );
        match chess_match.charge_second() {
            ClockCharge::Flagged(over) => {
                assert_eq!(over.kind, GameOverKind::Timeout);
                assert_eq!(over.winner_name.as_deref(), Some("Bob"));
            }
            other => panic!("expected a flag fall, got {other:?}"),
        }
        assert_eq!(chess_match.player(Side::White).time_left, 0);
        assert_eq!(chess_match.charge_second(), ClockCharge::Ignored);
        assert_eq!(chess_match.player(Side::Black).time_left, 1);
    }
}
