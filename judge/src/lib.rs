mod error;
mod game;
mod player;
mod recording;
mod turn;
pub use error::*;
pub use game::*;
pub use player::*;
pub use recording::*;
pub use turn::*;

use gridgames::GameConfig;

/// Settings shared by all games of a tournament.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    pub game: GameConfig,
    /// Games still running after this many turns are abandoned.
    pub max_turns: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_turns: 500,
        }
    }
}
