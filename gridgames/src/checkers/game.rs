use serde::{Deserialize, Serialize};

use super::{Board, Color, MoveKind, MoveOutcome, SquareSet, BOARD_SIZE};
use crate::{CheckersRules, CheckersSnapshot, Coord, IllegalMove};

/// Where a checkers game stands between two activations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    AwaitingSelection,
    /// `chain` is set while the selected piece is in the middle of a chain
    /// jump. It then stays selected and may only capture again.
    PieceSelected { at: Coord, chain: bool },
    GameOver { winner: Color },
}

/// What happens once a move has been executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterMove {
    /// The piece that just captured can capture again, the turn is kept.
    ChainContinues,
    TurnPassed,
    GameOver { winner: Color },
}

/// The effect of an accepted cell activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckersEvent {
    Selected(Coord),
    Deselected(Coord),
    Moved { outcome: MoveOutcome, after: AfterMove },
    /// The jumping piece was activated again, which gives up the remaining
    /// captures of the chain.
    ChainEnded { at: Coord, after: AfterMove },
}

impl CheckersEvent {
    /// Whether the side to move changed (or the game ended) with this event.
    pub fn ends_turn(&self) -> bool {
        match self {
            CheckersEvent::Selected(_) | CheckersEvent::Deselected(_) => false,
            CheckersEvent::Moved { after, .. } | CheckersEvent::ChainEnded { after, .. } => {
                !matches!(after, AfterMove::ChainContinues)
            }
        }
    }
}

/// A game of checkers: the board, the side to move and the selection.
///
/// Every mutating method either applies completely or returns an
/// [`IllegalMove`] and leaves the game as it was. Once the game is over,
/// every mutating method returns [`IllegalMove::GameOver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckersGame {
    board: Board,
    current_player: Color,
    phase: Phase,
    rules: CheckersRules,
}

impl CheckersGame {
    pub fn new(rules: CheckersRules) -> Self {
        Self {
            board: Board::initial(),
            current_player: Color::Red,
            phase: Phase::AwaitingSelection,
            rules,
        }
    }

    /// Starts from an arbitrary position with `to_move` on move.
    ///
    /// If that side cannot move, the game is over right away.
    pub fn from_position(board: Board, to_move: Color, rules: CheckersRules) -> Self {
        let mut game = Self {
            board,
            current_player: to_move,
            phase: Phase::AwaitingSelection,
            rules,
        };
        if let Some(winner) = game.winner_by_position() {
            game.phase = Phase::GameOver { winner };
        }
        game
    }

    /// Restores a game from the state a driver published.
    pub fn from_snapshot(snapshot: &CheckersSnapshot) -> Self {
        Self {
            board: Board::new(&snapshot.pieces),
            current_player: snapshot.to_move,
            phase: snapshot.phase,
            rules: snapshot.rules,
        }
    }

    pub fn snapshot(&self) -> CheckersSnapshot {
        CheckersSnapshot {
            rules: self.rules,
            pieces: self.board.to_pieces_vec(),
            to_move: self.current_player,
            phase: self.phase,
            legal_destinations: Vec::from_iter(self.legal_destinations()),
        }
    }

    /// Back to the starting position, keeping the rules.
    pub fn reset(&mut self) {
        *self = Self::new(self.rules);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rules(&self) -> CheckersRules {
        self.rules
    }

    pub fn selection(&self) -> Option<Coord> {
        match self.phase {
            Phase::PieceSelected { at, .. } => Some(at),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            Phase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    pub fn piece_count(&self, color: Color) -> u32 {
        self.board.count(color)
    }

    /// Whether the side to move may move the piece on `from` to `to` now.
    ///
    /// On top of the board geometry, this accounts for whose turn it is, an
    /// ongoing chain jump and the forced-capture rule.
    pub fn validate_move(&self, from: Coord, to: Coord) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// Where the selected piece may go; empty if nothing is selected.
    pub fn legal_destinations(&self) -> SquareSet {
        self.selection()
            .map(|at| self.legal_destinations_from(at))
            .unwrap_or_default()
    }

    pub fn legal_destinations_from(&self, from: Coord) -> SquareSet {
        self.board
            .destinations(from)
            .into_iter()
            .filter(|&to| self.validate_move(from, to))
            .collect()
    }

    /// Moves a piece directly, without going through selection.
    ///
    /// During a chain jump only the jumping piece may move. Any selection is
    /// replaced by the outcome of the move.
    pub fn play_move(&mut self, from: Coord, to: Coord) -> Result<CheckersEvent, IllegalMove> {
        self.check_move(from, to)?;
        let outcome = self.board.execute_move(from, to)?;

        let after = if outcome.captured.is_some() && self.board.has_further_jump(to) {
            self.phase = Phase::PieceSelected { at: to, chain: true };
            AfterMove::ChainContinues
        } else {
            self.pass_turn()
        };
        Ok(CheckersEvent::Moved { outcome, after })
    }

    /// Handles a click on a cell.
    ///
    /// Without a selection, a piece of the side to move gets selected.
    /// With a selection, activating the selected piece again deselects it
    /// (or ends a chain jump), activating another own piece moves the
    /// selection, and anything else is an attempt to move there.
    pub fn activate_cell(&mut self, at: Coord) -> Result<CheckersEvent, IllegalMove> {
        if self.is_terminal() {
            return Err(IllegalMove::GameOver);
        }
        if !at.is_within(BOARD_SIZE) {
            return Err(IllegalMove::OutOfBounds { at });
        }
        match self.phase {
            Phase::AwaitingSelection => self.select(at),
            Phase::PieceSelected { at: selected, chain } if selected == at => {
                if !chain {
                    self.phase = Phase::AwaitingSelection;
                    Ok(CheckersEvent::Deselected(at))
                } else if self.rules.forced_capture {
                    Err(IllegalMove::MustContinueChain { at })
                } else {
                    let after = self.pass_turn();
                    Ok(CheckersEvent::ChainEnded { at, after })
                }
            }
            Phase::PieceSelected { at: selected, chain } => {
                let own_piece = self
                    .board
                    .get(at)
                    .is_some_and(|piece| piece.color == self.current_player);
                if own_piece && !chain {
                    self.select(at)
                } else {
                    self.play_move(selected, at)
                }
            }
            Phase::GameOver { .. } => Err(IllegalMove::GameOver),
        }
    }

    fn select(&mut self, at: Coord) -> Result<CheckersEvent, IllegalMove> {
        let piece = self.board.get(at).ok_or(IllegalMove::NoPieceAtOrigin { at })?;
        if piece.color != self.current_player {
            return Err(IllegalMove::NotYourPiece { at });
        }
        self.phase = Phase::PieceSelected { at, chain: false };
        Ok(CheckersEvent::Selected(at))
    }

    fn check_move(&self, from: Coord, to: Coord) -> Result<MoveKind, IllegalMove> {
        if self.is_terminal() {
            return Err(IllegalMove::GameOver);
        }
        if !from.is_within(BOARD_SIZE) {
            return Err(IllegalMove::OutOfBounds { at: from });
        }
        let piece = self
            .board
            .get(from)
            .ok_or(IllegalMove::NoPieceAtOrigin { at: from })?;
        if piece.color != self.current_player {
            return Err(IllegalMove::NotYourPiece { at: from });
        }
        let chain_piece = match self.phase {
            Phase::PieceSelected { at, chain: true } => Some(at),
            _ => None,
        };
        if let Some(at) = chain_piece.filter(|&at| at != from) {
            return Err(IllegalMove::MustContinueChain { at });
        }

        let kind = self.board.classify_move(from, to)?;
        if kind == MoveKind::Simple {
            if let Some(at) = chain_piece {
                return Err(IllegalMove::MustContinueChain { at });
            }
            if self.rules.forced_capture && self.board.has_any_capture(self.current_player) {
                return Err(IllegalMove::CaptureAvailable);
            }
        }
        Ok(kind)
    }

    fn pass_turn(&mut self) -> AfterMove {
        self.current_player = self.current_player.opponent();
        match self.winner_by_position() {
            Some(winner) => {
                self.phase = Phase::GameOver { winner };
                AfterMove::GameOver { winner }
            }
            None => {
                self.phase = Phase::AwaitingSelection;
                AfterMove::TurnPassed
            }
        }
    }

    /// The side to move loses when it has no pieces left or cannot move any.
    fn winner_by_position(&self) -> Option<Color> {
        let to_move = self.current_player;
        let stuck = self.board.count(to_move) == 0 || !self.board.side_has_any_legal_move(to_move);
        stuck.then(|| to_move.opponent())
    }
}

impl Default for CheckersGame {
    fn default() -> Self {
        Self::new(CheckersRules::default())
    }
}
