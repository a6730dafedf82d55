use serde::{Deserialize, Serialize};

use crate::checkers::{Color, Phase, Piece};
use crate::gomoku::{Status, Stone};
use crate::{CheckersRules, Coord, GameConfig, GomokuRules, Seat};

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        config: GameConfig,
        /// [`Seat::First`] moves first, i.e. plays red in checkers and
        /// black in gomoku.
        seat: Seat,
    },
    /// Request to play a turn.
    ///
    /// The response should be a [`PlayTurnResponse`].
    PlayTurn { snapshot: Snapshot },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();

/// A checkers piece together with its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub at: Coord,
    pub color: Color,
    pub is_king: bool,
}

impl PlacedPiece {
    pub fn new(at: Coord, piece: Piece) -> Self {
        Self {
            at,
            color: piece.color,
            is_king: piece.is_king,
        }
    }

    pub fn piece(&self) -> Piece {
        Piece {
            color: self.color,
            is_king: self.is_king,
        }
    }
}

/// A gomoku stone together with its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedStone {
    pub at: Coord,
    pub stone: Stone,
}

/// Everything a bot (or any other driver) needs to know about a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum Snapshot {
    Checkers(CheckersSnapshot),
    Gomoku(GomokuSnapshot),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckersSnapshot {
    pub rules: CheckersRules,
    /// The board, represented as a list of the occupied cells in row-major
    /// order.
    pub pieces: Vec<PlacedPiece>,
    pub to_move: Color,
    pub phase: Phase,
    /// Where the selected piece may go. Empty without a selection.
    pub legal_destinations: Vec<Coord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GomokuSnapshot {
    pub rules: GomokuRules,
    /// The stones on the board in row-major order.
    pub stones: Vec<PlacedStone>,
    pub to_move: Stone,
    pub status: Status,
    pub last_move: Option<Coord>,
}

/// The cells to activate in this turn, in order.
///
/// A checkers turn is `[from, to]`, or `[from, to, to2, ...]` for a chain
/// jump. Without forced captures, a chain can be ended early by repeating
/// the cell the jumping piece stands on. A gomoku turn is a single cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayTurnResponse(pub Vec<Coord>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_format() {
        let request = Request::NewGame {
            config: GameConfig::default(),
            seat: Seat::Second,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "type": "NewGame",
                "config": {"variant": "checkers", "forced_capture": false},
                "seat": "second",
            })
        );
        let bye: Request = serde_json::from_str(r#"{"type": "Bye"}"#).unwrap();
        assert!(matches!(bye, Request::Bye));
    }

    #[test]
    fn play_turn_response_is_a_list_of_cells() {
        let response: PlayTurnResponse =
            serde_json::from_str(r#"[{"row": 2, "col": 1}, {"row": 3, "col": 2}]"#).unwrap();
        assert_eq!(
            response,
            PlayTurnResponse(vec![Coord::new(2, 1), Coord::new(3, 2)])
        );
    }

    #[test]
    fn snapshot_is_tagged_by_variant() {
        let snapshot = Snapshot::Gomoku(GomokuSnapshot {
            rules: GomokuRules::default(),
            stones: vec![PlacedStone {
                at: Coord::new(7, 7),
                stone: Stone::Black,
            }],
            to_move: Stone::White,
            status: Status::InProgress,
            last_move: Some(Coord::new(7, 7)),
        });
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["variant"], "gomoku");
        assert_eq!(json["stones"][0]["stone"], "black");
        let parsed: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
