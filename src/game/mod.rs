pub mod chess_match;
pub mod clock;
pub mod engine;
pub mod oracle;
pub mod selection;
pub mod utils;

pub use chess_match::{ChessMatch, ClockCharge, MatchPhase, MoveOutcome};
pub use clock::{Clock, TickOutcome};
pub use engine::MatchEngine;
pub use oracle::{AppliedMove, ChessOracle, RulesOracle};
pub use selection::{Advisory, ClickOutcome, Selection};
