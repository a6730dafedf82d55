use std::path::PathBuf;

use crate::Coord;

/// The error type for a rejected checkers move or cell activation.
///
/// Whenever an operation returns one of these, the game state is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OutOfBounds { at: Coord },
    LightSquare { at: Coord },
    NoPieceAtOrigin { at: Coord },
    NotYourPiece { at: Coord },
    TargetOccupied { at: Coord },
    NotDiagonal,
    WrongDirection,
    TooFar,
    NothingToCapture { over: Coord },
    /// Only raised when captures are mandatory.
    CaptureAvailable,
    /// A chain jump is in progress, only the jumping piece may capture again.
    MustContinueChain { at: Coord },
    GameOver,
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfBounds { at } => write!(f, "Cell {} is not on the board", at),
            IllegalMove::LightSquare { at } => {
                write!(f, "Cell {} is a light square, pieces only use dark squares", at)
            }
            IllegalMove::NoPieceAtOrigin { at } => write!(f, "There is no piece on {}", at),
            IllegalMove::NotYourPiece { at } => {
                write!(f, "The piece on {} belongs to the opponent", at)
            }
            IllegalMove::TargetOccupied { at } => write!(f, "Cell {} is already occupied", at),
            IllegalMove::NotDiagonal => write!(f, "Pieces only move diagonally"),
            IllegalMove::WrongDirection => {
                write!(f, "Only kings may move toward their own side")
            }
            IllegalMove::TooFar => write!(f, "A move spans at most two diagonal steps"),
            IllegalMove::NothingToCapture { over } => {
                write!(f, "A jump must pass over an opposing piece, but {} is not one", over)
            }
            IllegalMove::CaptureAvailable => {
                write!(f, "A capture is available, so a simple move is not allowed")
            }
            IllegalMove::MustContinueChain { at } => {
                write!(f, "The piece on {} is in the middle of a chain jump", at)
            }
            IllegalMove::GameOver => write!(f, "The game is already over"),
        }
    }
}

/// The error type for a rejected gomoku placement.
///
/// Whenever an operation returns one of these, the game state is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    OutOfBounds { at: Coord },
    Occupied { at: Coord },
    GameOver,
}

impl std::error::Error for IllegalPlacement {}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::OutOfBounds { at } => write!(f, "Cell {} is not on the board", at),
            IllegalPlacement::Occupied { at } => {
                write!(f, "Cell {} already holds a stone", at)
            }
            IllegalPlacement::GameOver => write!(f, "The game is already over"),
        }
    }
}

/// The error type for [`Session::on_cell_activated()`](crate::Session::on_cell_activated).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalActivation {
    Checkers(IllegalMove),
    Gomoku(IllegalPlacement),
}

impl IllegalActivation {
    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            IllegalActivation::Checkers(IllegalMove::GameOver)
                | IllegalActivation::Gomoku(IllegalPlacement::GameOver)
        )
    }
}

impl std::error::Error for IllegalActivation {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalActivation::Checkers(err) => Some(err),
            IllegalActivation::Gomoku(err) => Some(err),
        }
    }
}

impl std::fmt::Display for IllegalActivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalActivation::Checkers(_) => write!(f, "Illegal checkers activation"),
            IllegalActivation::Gomoku(_) => write!(f, "Illegal gomoku activation"),
        }
    }
}

impl From<IllegalMove> for IllegalActivation {
    fn from(err: IllegalMove) -> Self {
        IllegalActivation::Checkers(err)
    }
}

impl From<IllegalPlacement> for IllegalActivation {
    fn from(err: IllegalPlacement) -> Self {
        IllegalActivation::Gomoku(err)
    }
}

/// The error type for loading and validating a [`GameConfig`](crate::GameConfig).
#[derive(Debug)]
pub enum ConfigError {
    Invalid(String),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Invalid(_) => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Json(err) => Some(err),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid(reason) => write!(f, "Invalid game config: {}", reason),
            ConfigError::Io { path, .. } => {
                write!(f, "Could not read game config '{}'", path.display())
            }
            ConfigError::Json(_) => write!(f, "Could not parse game config"),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn activation_error_exposes_its_cause() {
        let err = IllegalActivation::from(IllegalPlacement::Occupied {
            at: Coord::new(7, 7),
        });
        assert_eq!(err.to_string(), "Illegal gomoku activation");
        assert_eq!(
            err.source().map(|src| src.to_string()),
            Some(String::from("Cell (7, 7) already holds a stone"))
        );
    }

    #[test]
    fn game_over_detection() {
        assert!(IllegalActivation::from(IllegalMove::GameOver).is_game_over());
        assert!(!IllegalActivation::from(IllegalMove::TooFar).is_game_over());
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Invalid(String::from("win_length must be > 0"));
        assert_eq!(err.to_string(), "Invalid game config: win_length must be > 0");
        assert!(err.source().is_none());
    }
}
