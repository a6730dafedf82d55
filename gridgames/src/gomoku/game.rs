use serde::{Deserialize, Serialize};

use super::{Board, Stone};
use crate::{Coord, GomokuRules, GomokuSnapshot, IllegalPlacement};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "winner", rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Won(Stone),
    /// The board filled up without a winning run.
    Drawn,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        self != Status::InProgress
    }
}

/// An accepted placement and the status right after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub at: Coord,
    pub stone: Stone,
    pub status: Status,
}

/// A game of gomoku.
///
/// A rejected placement leaves the game untouched. Once the game is won or
/// drawn, the board is frozen until [`GomokuGame::reset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GomokuGame {
    board: Board,
    current_player: Stone,
    status: Status,
    rules: GomokuRules,
    last_move: Option<Coord>,
}

impl GomokuGame {
    /// An empty board with black to move.
    ///
    /// The rules are expected to be validated, see [`crate::GameConfig::validate`].
    pub fn new(rules: GomokuRules) -> Self {
        Self {
            board: Board::new(rules.board_size),
            current_player: Stone::Black,
            status: Status::InProgress,
            rules,
            last_move: None,
        }
    }

    pub fn from_snapshot(snapshot: &GomokuSnapshot) -> Self {
        Self {
            board: Board::from_stones(snapshot.rules.board_size, &snapshot.stones),
            current_player: snapshot.to_move,
            status: snapshot.status,
            rules: snapshot.rules,
            last_move: snapshot.last_move,
        }
    }

    pub fn snapshot(&self) -> GomokuSnapshot {
        GomokuSnapshot {
            rules: self.rules,
            stones: self.board.to_stones_vec(),
            to_move: self.current_player,
            status: self.status,
            last_move: self.last_move,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.rules);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Stone {
        self.current_player
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn rules(&self) -> GomokuRules {
        self.rules
    }

    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    pub fn winner(&self) -> Option<Stone> {
        match self.status {
            Status::Won(stone) => Some(stone),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Places a stone for the side to move.
    ///
    /// A completed run wins even if it also fills the board. Otherwise a
    /// full board is a draw, and if neither, the other side moves next.
    pub fn place_stone(&mut self, at: Coord) -> Result<Placement, IllegalPlacement> {
        if self.is_terminal() {
            return Err(IllegalPlacement::GameOver);
        }
        let stone = self.current_player;
        self.board.place_stone(at, stone)?;
        self.last_move = Some(at);

        self.status = if self.evaluate_win(at, stone) {
            Status::Won(stone)
        } else if self.evaluate_draw() {
            Status::Drawn
        } else {
            self.current_player = stone.opponent();
            Status::InProgress
        };
        Ok(Placement {
            at,
            stone,
            status: self.status,
        })
    }

    /// Whether `stone` on `at` forms a run of at least the configured length.
    pub fn evaluate_win(&self, at: Coord, stone: Stone) -> bool {
        self.board
            .evaluate_win(at, stone, usize::from(self.rules.win_length))
    }

    pub fn evaluate_draw(&self) -> bool {
        self.board.is_full()
    }

    /// A click places a stone for the side to move.
    pub fn activate_cell(&mut self, at: Coord) -> Result<Placement, IllegalPlacement> {
        self.place_stone(at)
    }
}

impl Default for GomokuGame {
    fn default() -> Self {
        Self::new(GomokuRules::default())
    }
}
