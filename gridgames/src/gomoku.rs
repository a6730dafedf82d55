//! Gomoku (five in a row) on a square board, 15x15 by default.
//!
//! Black places the first stone, then the players alternate. Stones never
//! move and are never removed. The first player to complete a run of
//! `win_length` stones along a row, column or diagonal wins; a full board
//! without such a run is a draw.
mod board;
mod game;

pub use board::*;
pub use game::*;

pub use crate::errors::IllegalPlacement;
