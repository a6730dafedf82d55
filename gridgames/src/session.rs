use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::checkers::{CheckersEvent, CheckersGame, Color, SquareSet};
use crate::gomoku::{GomokuGame, Placement, Status, Stone};
use crate::{Coord, GameConfig, IllegalActivation, Snapshot};

/// The two sides of a game, independent of the variant.
///
/// The first seat moves first: red in checkers, black in gomoku.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn checkers_color(self) -> Color {
        match self {
            Seat::First => Color::Red,
            Seat::Second => Color::Black,
        }
    }

    pub fn gomoku_stone(self) -> Stone {
        match self {
            Seat::First => Stone::Black,
            Seat::Second => Stone::White,
        }
    }
}

impl From<Color> for Seat {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => Seat::First,
            Color::Black => Seat::Second,
        }
    }
}

impl From<Stone> for Seat {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Seat::First,
            Stone::White => Seat::Second,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Seat),
    Draw,
}

/// The effect of an accepted activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    Checkers(CheckersEvent),
    Gomoku(Placement),
}

impl Activation {
    /// Whether the side to move changed, or the game ended.
    pub fn ends_turn(&self) -> bool {
        match self {
            Activation::Checkers(event) => event.ends_turn(),
            Activation::Gomoku(_) => true,
        }
    }
}

/// The active game, driven by cell activations.
///
/// This is the whole surface a driver needs: it forwards clicks and reset
/// requests, and polls the queries afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
    Checkers(CheckersGame),
    Gomoku(GomokuGame),
}

impl Session {
    /// Starts a game in its initial position.
    ///
    /// The config is expected to be validated, see [`GameConfig::validate`].
    pub fn new(config: &GameConfig) -> Self {
        match *config {
            GameConfig::Checkers(rules) => Session::Checkers(CheckersGame::new(rules)),
            GameConfig::Gomoku(rules) => Session::Gomoku(GomokuGame::new(rules)),
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        match snapshot {
            Snapshot::Checkers(snapshot) => Session::Checkers(CheckersGame::from_snapshot(snapshot)),
            Snapshot::Gomoku(snapshot) => Session::Gomoku(GomokuGame::from_snapshot(snapshot)),
        }
    }

    pub fn config(&self) -> GameConfig {
        match self {
            Session::Checkers(game) => GameConfig::Checkers(game.rules()),
            Session::Gomoku(game) => GameConfig::Gomoku(game.rules()),
        }
    }

    /// Forwards a click to the active engine.
    ///
    /// On error, nothing changed.
    pub fn on_cell_activated(&mut self, at: Coord) -> Result<Activation, IllegalActivation> {
        let activation = match self {
            Session::Checkers(game) => Activation::Checkers(game.activate_cell(at)?),
            Session::Gomoku(game) => Activation::Gomoku(game.activate_cell(at)?),
        };
        trace!(%at, ?activation, "Activation accepted");
        if let Some(outcome) = self.outcome() {
            if activation.ends_turn() {
                debug!(?outcome, "Game over");
            }
        }
        Ok(activation)
    }

    /// Back to the initial position of the same variant and rules.
    pub fn on_reset_requested(&mut self) {
        match self {
            Session::Checkers(game) => game.reset(),
            Session::Gomoku(game) => game.reset(),
        }
        trace!("Game reset");
    }

    /// `None` once the game is over.
    pub fn current_seat(&self) -> Option<Seat> {
        if self.is_terminal() {
            return None;
        }
        Some(match self {
            Session::Checkers(game) => Seat::from(game.current_player()),
            Session::Gomoku(game) => Seat::from(game.current_player()),
        })
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Session::Checkers(game) => game.winner().map(|color| Outcome::Winner(color.into())),
            Session::Gomoku(game) => match game.status() {
                Status::InProgress => None,
                Status::Won(stone) => Some(Outcome::Winner(stone.into())),
                Status::Drawn => Some(Outcome::Draw),
            },
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// The selected checkers piece. Always `None` for gomoku.
    pub fn selection(&self) -> Option<Coord> {
        match self {
            Session::Checkers(game) => game.selection(),
            Session::Gomoku(_) => None,
        }
    }

    /// Where the selected checkers piece may go. Always empty for gomoku.
    pub fn legal_destinations(&self) -> SquareSet {
        match self {
            Session::Checkers(game) => game.legal_destinations(),
            Session::Gomoku(_) => SquareSet::empty(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match self {
            Session::Checkers(game) => Snapshot::Checkers(game.snapshot()),
            Session::Gomoku(game) => Snapshot::Gomoku(game.snapshot()),
        }
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Session::Checkers(game) => write!(f, "{}", game.board()),
            Session::Gomoku(game) => write!(f, "{}", game.board()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GomokuRules, IllegalPlacement};

    fn at(row: i8, col: i8) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn checkers_clicks_through_session() {
        let mut session = Session::new(&GameConfig::default());
        assert_eq!(session.current_seat(), Some(Seat::First));

        let selected = session.on_cell_activated(at(2, 1)).unwrap();
        assert!(!selected.ends_turn());
        assert_eq!(session.selection(), Some(at(2, 1)));
        assert_eq!(Vec::from_iter(session.legal_destinations()), vec![at(3, 0), at(3, 2)]);

        let moved = session.on_cell_activated(at(3, 2)).unwrap();
        assert!(moved.ends_turn());
        assert_eq!(session.current_seat(), Some(Seat::Second));
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn gomoku_clicks_through_session() {
        let rules = GomokuRules {
            board_size: 3,
            win_length: 3,
        };
        let mut session = Session::new(&GameConfig::Gomoku(rules));
        for cell in [at(0, 0), at(1, 0), at(0, 1), at(1, 1)] {
            assert!(session.on_cell_activated(cell).unwrap().ends_turn());
        }
        assert_eq!(
            session.on_cell_activated(at(1, 1)),
            Err(IllegalActivation::Gomoku(IllegalPlacement::Occupied { at: at(1, 1) }))
        );
        session.on_cell_activated(at(0, 2)).unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Winner(Seat::First)));
        assert_eq!(session.current_seat(), None);
        assert!(session
            .on_cell_activated(at(2, 2))
            .unwrap_err()
            .is_game_over());

        session.on_reset_requested();
        assert_eq!(session, Session::new(&GameConfig::Gomoku(rules)));
    }

    #[test]
    fn snapshot_restores_session() {
        let mut session = Session::new(&GameConfig::default());
        session.on_cell_activated(at(2, 3)).unwrap();
        let restored = Session::from_snapshot(&session.snapshot());
        assert_eq!(restored, session);
        assert_eq!(restored.config(), GameConfig::default());
    }

    #[test]
    fn seats_map_to_sides() {
        for seat in [Seat::First, Seat::Second] {
            assert_eq!(Seat::from(seat.checkers_color()), seat);
            assert_eq!(Seat::from(seat.gomoku_stone()), seat);
            assert_eq!(seat.other().other(), seat);
        }
    }
}
