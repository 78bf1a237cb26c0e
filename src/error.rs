use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chess::Square;
use serde_json::json;
use thiserror::Error;

use crate::models::Side;

/// Problems with the setup form or the handoff record built from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("player {0} needs a name")]
    EmptyName(char),
    #[error("unsupported time control: {0} minutes (choose 5 or 10)")]
    UnsupportedTimeControl(u32),
    #[error("both players were assigned {0}")]
    SameColor(Side),
    #[error("{0} starts with no time on the clock")]
    NoTime(String),
    #[error("a match must start with white to move, record says {0}")]
    WrongFirstTurn(Side),
    #[error("no setup record with id {0}")]
    Missing(String),
}

impl ResponseError for SetupError {
    fn status_code(&self) -> StatusCode {
        match self {
            SetupError::Missing(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Why a move could not be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the match is not in progress")]
    NotInProgress,
    #[error("rules rejected {from}{to}")]
    Rejected { from: Square, to: Square },
}

/// Invalid values in the server environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid port: {value}")]
    InvalidPort { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
