//! Checkers on an 8x8 board.
//!
//! Red starts on rows 0–2 and moves first, black starts on rows 5–7. Men move
//! one step diagonally toward the opponent's edge or jump over an opposing
//! piece; kings do the same in both directions. Captures are optional unless
//! [`CheckersRules::forced_capture`](crate::CheckersRules) is set.
mod board;
mod game;
mod squares;

pub use board::*;
pub use game::*;
pub use squares::*;

pub use crate::errors::IllegalMove;
