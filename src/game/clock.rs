use std::time::{Duration, Instant};

use log::debug;

use super::chess_match::{ChessMatch, ClockCharge};
use crate::models::GameOver;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// What a wake-up of the clock did to the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub seconds_charged: u32,
    pub timeout: Option<GameOver>,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        self.seconds_charged > 0 || self.timeout.is_some()
    }
}

/// Flat countdown for the side to move.
///
/// The clock never hands off between players: it always charges whoever
/// the match says is to move. Wake-ups are measured against wall time, so
/// a late or skipped wake-up charges every whole second that passed, once.
#[derive(Debug, Clone)]
pub struct Clock {
    anchor: Instant,
}

impl Clock {
    pub fn start(now: Instant) -> Self {
        Self { anchor: now }
    }

    /// Whole seconds elapsed since the last charged second. The fractional
    /// remainder carries over to the next wake-up.
    fn take_elapsed(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.anchor);
        let seconds = elapsed.as_secs();
        self.anchor += Duration::from_secs(seconds);
        seconds
    }

    /// Charges one second to the side to move.
    pub fn charge_one_second(chess_match: &mut ChessMatch) -> ClockCharge {
        chess_match.charge_second()
    }

    pub fn tick(&mut self, chess_match: &mut ChessMatch, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome {
            seconds_charged: 0,
            timeout: None,
        };
        if !chess_match.is_in_progress() {
            return outcome;
        }

        let seconds = self.take_elapsed(now);
        if seconds > 1 {
            debug!("Clock woke up late, charging {} seconds", seconds);
        }
        for _ in 0..seconds {
            match Self::charge_one_second(chess_match) {
                ClockCharge::Charged { .. } => outcome.seconds_charged += 1,
                ClockCharge::Flagged(game_over) => {
                    outcome.timeout = Some(game_over);
                    break;
                }
                ClockCharge::Ignored => break,
            }
        }
        outcome
    }

    /// Interval the session should wake the clock at.
    pub fn period() -> Duration {
        ONE_SECOND
    }
}
