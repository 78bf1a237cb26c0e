//! Clocked two-player chess at one board.
//!
//! [`game`] holds the match state machine, its clock and the click-to-move
//! selection logic. [`websocket`] and [`routes`] put one match per browser
//! connection behind actix-web.

pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod websocket;
