use std::fmt;

use chess::Color;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// A side of the board, as it travels over the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Flat countdown choices offered by the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeControl {
    FiveMinutes,
    TenMinutes,
}

impl TimeControl {
    pub fn from_minutes(minutes: u32) -> Result<Self, SetupError> {
        match minutes {
            5 => Ok(TimeControl::FiveMinutes),
            10 => Ok(TimeControl::TenMinutes),
            other => Err(SetupError::UnsupportedTimeControl(other)),
        }
    }

    pub fn minutes(self) -> u32 {
        match self {
            TimeControl::FiveMinutes => 5,
            TimeControl::TenMinutes => 10,
        }
    }

    pub fn seconds(self) -> u32 {
        self.minutes() * 60
    }
}

/// One of the two people at the board.
///
/// `time_left` is whole seconds and only ever decreases, one second at a
/// time, through the clock.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub color: Side,
    pub time_left: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Side, time_left: u32) -> Self {
        Self {
            name: name.into(),
            color,
            time_left,
        }
    }
}
