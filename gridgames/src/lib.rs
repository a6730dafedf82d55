//! Rule engines for checkers and gomoku.
//!
//! Both engines are plain values: they own their board, accept one cell
//! activation at a time and reject illegal input without changing state.
//! [`Session`] wraps whichever engine is active and is the only surface a
//! driver needs.
pub use config::*;
pub use coord::*;
pub use errors::*;
pub use protocol_types::*;
pub use session::*;
pub use visualization::*;

pub mod checkers;
pub mod gomoku;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod config;
mod coord;
mod errors;
mod protocol_types;
mod session;
mod visualization;
