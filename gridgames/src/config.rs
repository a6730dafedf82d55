use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gomoku::MAX_BOARD_SIZE;
use crate::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckersRules {
    /// When set, a simple move is illegal while the side to move has any
    /// capture, and a chain jump cannot be ended early.
    pub forced_capture: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GomokuRules {
    pub board_size: u8,
    pub win_length: u8,
}

impl Default for GomokuRules {
    fn default() -> Self {
        Self {
            board_size: 15,
            win_length: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Checkers,
    Gomoku,
}

/// Which game to play, and with which rules.
///
/// In JSON, the variant is a tag next to the rule fields, e.g.
/// `{"variant": "gomoku", "board_size": 15, "win_length": 5}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum GameConfig {
    Checkers(CheckersRules),
    Gomoku(GomokuRules),
}

impl GameConfig {
    pub fn default_for(variant: Variant) -> Self {
        match variant {
            Variant::Checkers => GameConfig::Checkers(CheckersRules::default()),
            Variant::Gomoku => GameConfig::Gomoku(GomokuRules::default()),
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            GameConfig::Checkers(_) => Variant::Checkers,
            GameConfig::Gomoku(_) => Variant::Gomoku,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let GameConfig::Gomoku(rules) = self else {
            return Ok(());
        };
        if rules.board_size == 0 || rules.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::Invalid(format!(
                "board_size must be between 1 and {}, got {}",
                MAX_BOARD_SIZE, rules.board_size
            )));
        }
        if rules.win_length == 0 {
            return Err(ConfigError::Invalid(String::from(
                "win_length must be at least 1",
            )));
        }
        if rules.win_length > rules.board_size {
            return Err(ConfigError::Invalid(format!(
                "win_length {} does not fit on a board of size {}",
                rules.win_length, rules.board_size
            )));
        }
        Ok(())
    }

    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::default_for(Variant::Checkers)
    }
}
