use serde::{Deserialize, Serialize};

use super::{SquareSet, BOARD_SIZE};
use crate::{Coord, IllegalMove, PlacedPiece, DIAGONALS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Starts on rows 0–2 and moves first.
    Red,
    /// Starts on rows 5–7.
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// The row step in which men of this color advance.
    pub fn forward(self) -> i8 {
        match self {
            Color::Red => 1,
            Color::Black => -1,
        }
    }

    /// The far edge, where men of this color are crowned.
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::Red => BOARD_SIZE - 1,
            Color::Black => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub is_king: bool,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Piece {
            color,
            is_king: false,
        }
    }

    pub fn king(color: Color) -> Self {
        Piece {
            color,
            is_king: true,
        }
    }
}

/// The geometry of a legal move, as decided by [`Board::classify_move()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Simple,
    Capture { captured: Coord },
}

/// Summarizes the effects of an executed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Coord,
    pub to: Coord,
    /// The removed opposing piece and where it stood.
    pub captured: Option<(Coord, Piece)>,
    /// The moving piece was crowned by this move.
    pub promoted: bool,
}

/// An 8x8 checkers board.
///
/// Stored as three [`SquareSet`]s. A cell is in at most one of `red` and
/// `black`, and `kings` is a subset of their union; the king flag is part of
/// the stored state and does not depend on where the piece stands.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    red: SquareSet,
    black: SquareSet,
    kings: SquareSet,
}

impl Board {
    /// The starting position: twelve men per side on the dark cells of the
    /// three rows nearest to each player.
    pub fn initial() -> Self {
        Self {
            red: SquareSet::dark_rows(0..3),
            black: SquareSet::dark_rows(5..BOARD_SIZE),
            kings: SquareSet::empty(),
        }
    }

    pub fn empty() -> Self {
        Self {
            red: SquareSet::empty(),
            black: SquareSet::empty(),
            kings: SquareSet::empty(),
        }
    }

    /// Creates a board from a list of pieces.
    ///
    /// Panics if the pieces are (obviously) invalid, i.e. off the board, on a
    /// light cell, or two on the same cell.
    pub fn new(pieces: &[PlacedPiece]) -> Self {
        let mut board = Self::empty();
        for placed in pieces {
            assert!(
                SquareSet::DARK.contains(placed.at),
                "{} is not a dark cell",
                placed.at
            );
            assert!(board.get(placed.at).is_none(), "{} is occupied twice", placed.at);
            board.put(placed.at, placed.piece());
        }
        board
    }

    pub fn get(&self, at: Coord) -> Option<Piece> {
        let color = if self.red.contains(at) {
            Color::Red
        } else if self.black.contains(at) {
            Color::Black
        } else {
            return None;
        };
        Some(Piece {
            color,
            is_king: self.kings.contains(at),
        })
    }

    /// Whether pieces may ever stand on this cell.
    pub fn is_dark(at: Coord) -> bool {
        SquareSet::DARK.contains(at)
    }

    pub fn pieces(&self, color: Color) -> SquareSet {
        match color {
            Color::Red => self.red,
            Color::Black => self.black,
        }
    }

    pub fn kings(&self) -> SquareSet {
        self.kings
    }

    pub fn occupied(&self) -> SquareSet {
        self.red | self.black
    }

    /// The live-piece count of one side.
    pub fn count(&self, color: Color) -> u32 {
        self.pieces(color).len()
    }

    /// Decides whether moving the piece on `from` to `to` is legal, and how.
    ///
    /// This only looks at the board, not at whose turn it is. The checks are
    /// made in a fixed order, so the error names the first rule violated.
    pub fn classify_move(&self, from: Coord, to: Coord) -> Result<MoveKind, IllegalMove> {
        for at in [from, to] {
            if !at.is_within(BOARD_SIZE) {
                return Err(IllegalMove::OutOfBounds { at });
            }
        }
        let piece = self
            .get(from)
            .ok_or(IllegalMove::NoPieceAtOrigin { at: from })?;
        if !Self::is_dark(to) {
            return Err(IllegalMove::LightSquare { at: to });
        }
        if self.get(to).is_some() {
            return Err(IllegalMove::TargetOccupied { at: to });
        }

        let (d_row, d_col) = (to.row - from.row, to.col - from.col);
        if d_row.abs() != d_col.abs() || d_row == 0 {
            return Err(IllegalMove::NotDiagonal);
        }
        if d_row.abs() > 2 {
            return Err(IllegalMove::TooFar);
        }
        if !piece.is_king && d_row.signum() != piece.color.forward() {
            return Err(IllegalMove::WrongDirection);
        }
        if d_row.abs() == 1 {
            return Ok(MoveKind::Simple);
        }

        let over = Coord::new(from.row + d_row / 2, from.col + d_col / 2);
        match self.get(over) {
            Some(jumped) if jumped.color != piece.color => Ok(MoveKind::Capture { captured: over }),
            _ => Err(IllegalMove::NothingToCapture { over }),
        }
    }

    /// Pure predicate form of [`Self::classify_move()`].
    pub fn is_valid_move(&self, from: Coord, to: Coord) -> bool {
        self.classify_move(from, to).is_ok()
    }

    /// Executes a move, including capture and promotion.
    ///
    /// The move is validated first; on error the board is left untouched.
    pub fn execute_move(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, IllegalMove> {
        let kind = self.classify_move(from, to)?;
        // classify_move() guarantees a piece on `from`
        let mut piece = self.take(from).ok_or(IllegalMove::NoPieceAtOrigin { at: from })?;

        let captured = match kind {
            MoveKind::Simple => None,
            MoveKind::Capture { captured } => self.take(captured).map(|p| (captured, p)),
        };

        let promoted = !piece.is_king && to.row == piece.color.promotion_row();
        piece.is_king |= promoted;
        self.put(to, piece);

        Ok(MoveOutcome {
            from,
            to,
            captured,
            promoted,
        })
    }

    /// The cells the piece on `from` could move to with a single step.
    pub fn simple_destinations(&self, from: Coord) -> SquareSet {
        self.destinations_at_distance(from, 1)
    }

    /// The cells the piece on `from` could jump to.
    pub fn capture_destinations(&self, from: Coord) -> SquareSet {
        self.destinations_at_distance(from, 2)
    }

    pub fn destinations(&self, from: Coord) -> SquareSet {
        self.simple_destinations(from) | self.capture_destinations(from)
    }

    /// After a capture landed on `at`, can the same piece capture again?
    ///
    /// Scans the four jump geometries from `at`, applying the same rules as
    /// [`Self::classify_move()`] (so men still only jump forward).
    pub fn has_further_jump(&self, at: Coord) -> bool {
        !self.capture_destinations(at).is_empty()
    }

    pub fn has_any_capture(&self, color: Color) -> bool {
        self.pieces(color).into_iter().any(|at| self.has_further_jump(at))
    }

    /// Whether `color` has at least one legal simple move or capture.
    ///
    /// A side without one loses when it is to move.
    pub fn side_has_any_legal_move(&self, color: Color) -> bool {
        self.pieces(color)
            .into_iter()
            .any(|at| !self.destinations(at).is_empty())
    }

    /// All pieces, in row-major order.
    pub fn to_pieces_vec(&self) -> Vec<PlacedPiece> {
        self.occupied()
            .into_iter()
            .filter_map(|at| self.get(at).map(|piece| PlacedPiece::new(at, piece)))
            .collect()
    }

    fn destinations_at_distance(&self, from: Coord, distance: i8) -> SquareSet {
        DIAGONALS
            .iter()
            .filter_map(|&(d_row, d_col)| from.offset(d_row * distance, d_col * distance))
            .filter(|&to| self.is_valid_move(from, to))
            .collect()
    }

    pub(crate) fn put(&mut self, at: Coord, piece: Piece) {
        match piece.color {
            Color::Red => self.red = self.red.insert(at),
            Color::Black => self.black = self.black.insert(at),
        }
        if piece.is_king {
            self.kings = self.kings.insert(at);
        }
    }

    pub(crate) fn take(&mut self, at: Coord) -> Option<Piece> {
        let piece = self.get(at)?;
        self.red = self.red.remove(at);
        self.black = self.black.remove(at);
        self.kings = self.kings.remove(at);
        Some(piece)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::CheckersPosition;

    fn board_with(pieces: &[((i8, i8), Piece)]) -> Board {
        let placed: Vec<PlacedPiece> = pieces
            .iter()
            .map(|&(at, piece)| PlacedPiece::new(at.into(), piece))
            .collect();
        Board::new(&placed)
    }

    quickcheck! {
        fn occupied_and_light_targets_are_rejected(pos: CheckersPosition) -> bool {
            let board = pos.board;
            board.occupied().into_iter().all(|from| {
                (0..BOARD_SIZE).all(|row| {
                    (0..BOARD_SIZE).all(|col| {
                        let to = Coord::new(row, col);
                        let blocked = board.get(to).is_some() || !Board::is_dark(to);
                        !(blocked && board.is_valid_move(from, to))
                    })
                })
            })
        }

        fn capture_removes_exactly_one_opposing_piece(pos: CheckersPosition) -> bool {
            let board = pos.board;
            for from in board.occupied() {
                let color = board.get(from).unwrap().color;
                for to in board.capture_destinations(from) {
                    let mut after = board;
                    let outcome = after.execute_move(from, to).unwrap();
                    let total_before = board.occupied().len();
                    if after.occupied().len() + 1 != total_before
                        || after.count(color.opponent()) + 1 != board.count(color.opponent())
                        || after.count(color) != board.count(color)
                        || outcome.captured.map(|(_, p)| p.color) != Some(color.opponent())
                    {
                        return false;
                    }
                }
            }
            true
        }

        fn kings_stay_kings(pos: CheckersPosition) -> bool {
            let board = pos.board;
            for from in board.kings() {
                for to in board.destinations(from) {
                    let mut after = board;
                    after.execute_move(from, to).unwrap();
                    if after.get(to).map(|p| p.is_king) != Some(true) {
                        return false;
                    }
                }
            }
            true
        }

        fn queries_are_idempotent(pos: CheckersPosition) -> bool {
            let board = pos.board;
            let first: Vec<_> = board.occupied().into_iter().map(|at| board.destinations(at)).collect();
            let second: Vec<_> = board.occupied().into_iter().map(|at| board.destinations(at)).collect();
            first == second
                && board.side_has_any_legal_move(pos.to_move) == board.side_has_any_legal_move(pos.to_move)
        }

        fn destinations_agree_with_classification(pos: CheckersPosition) -> bool {
            let board = pos.board;
            board.occupied().into_iter().all(|from| {
                SquareSet::DARK.into_iter().all(|to| {
                    board.destinations(from).contains(to) == board.is_valid_move(from, to)
                })
            })
        }
    }

    #[test]
    fn initial_position() {
        let board = Board::initial();
        assert_eq!(board.count(Color::Red), 12);
        assert_eq!(board.count(Color::Black), 12);
        assert!(board.kings().is_empty());
        assert_eq!(board.get(Coord::new(0, 1)), Some(Piece::man(Color::Red)));
        assert_eq!(board.get(Coord::new(7, 0)), Some(Piece::man(Color::Black)));
        assert_eq!(board.get(Coord::new(3, 2)), None);
        assert!((board.occupied() - SquareSet::DARK).is_empty());
    }

    #[test]
    fn opening_simple_move() {
        let mut board = Board::initial();
        let (from, to) = (Coord::new(2, 1), Coord::new(3, 2));
        assert_eq!(board.classify_move(from, to), Ok(MoveKind::Simple));
        let outcome = board.execute_move(from, to).unwrap();
        assert_eq!(outcome.captured, None);
        assert!(!outcome.promoted);
        assert_eq!(board.get(from), None);
        assert_eq!(board.get(to), Some(Piece::man(Color::Red)));
    }

    #[test]
    fn capture_over_opposing_piece() {
        let mut board = board_with(&[
            ((2, 1), Piece::man(Color::Red)),
            ((3, 2), Piece::man(Color::Black)),
        ]);
        let (from, to) = (Coord::new(2, 1), Coord::new(4, 3));
        assert_eq!(
            board.classify_move(from, to),
            Ok(MoveKind::Capture {
                captured: Coord::new(3, 2)
            })
        );
        let outcome = board.execute_move(from, to).unwrap();
        assert_eq!(
            outcome.captured,
            Some((Coord::new(3, 2), Piece::man(Color::Black)))
        );
        assert_eq!(board.count(Color::Black), 0);
        assert_eq!(board.get(Coord::new(3, 2)), None);
        assert_eq!(board.get(to), Some(Piece::man(Color::Red)));
    }

    #[test]
    fn rejected_moves() {
        let board = board_with(&[
            ((2, 1), Piece::man(Color::Red)),
            ((3, 2), Piece::man(Color::Red)),
            ((5, 2), Piece::man(Color::Black)),
        ]);
        let at = Coord::new;
        assert_eq!(
            board.classify_move(at(2, 1), at(3, 2)),
            Err(IllegalMove::TargetOccupied { at: at(3, 2) })
        );
        assert_eq!(
            board.classify_move(at(2, 1), at(4, 3)),
            Err(IllegalMove::NothingToCapture { over: at(3, 2) })
        );
        assert_eq!(
            board.classify_move(at(2, 1), at(3, 1)),
            Err(IllegalMove::LightSquare { at: at(3, 1) })
        );
        assert_eq!(
            board.classify_move(at(2, 1), at(4, 1)),
            Err(IllegalMove::NotDiagonal)
        );
        assert_eq!(
            board.classify_move(at(3, 2), at(6, 5)),
            Err(IllegalMove::TooFar)
        );
        assert_eq!(
            board.classify_move(at(5, 2), at(6, 1)),
            Err(IllegalMove::WrongDirection)
        );
        assert_eq!(
            board.classify_move(at(4, 4), at(5, 5)),
            Err(IllegalMove::NoPieceAtOrigin { at: at(4, 4) })
        );
        assert_eq!(
            board.classify_move(at(2, 1), at(-1, 4)),
            Err(IllegalMove::OutOfBounds { at: at(-1, 4) })
        );
        assert_eq!(
            board.classify_move(at(3, 2), at(5, 2)),
            Err(IllegalMove::TargetOccupied { at: at(5, 2) })
        );
        assert_eq!(
            board.classify_move(at(3, 2), at(3, 4)),
            Err(IllegalMove::NotDiagonal)
        );
    }

    #[test]
    fn kings_move_backwards() {
        let board = board_with(&[((4, 3), Piece::king(Color::Red))]);
        let expected = SquareSet::from_iter([
            Coord::new(3, 2),
            Coord::new(3, 4),
            Coord::new(5, 2),
            Coord::new(5, 4),
        ]);
        assert_eq!(board.destinations(Coord::new(4, 3)), expected);
    }

    #[test]
    fn promotion_on_far_edge() {
        let mut board = board_with(&[((1, 2), Piece::man(Color::Black))]);
        let outcome = board.execute_move(Coord::new(1, 2), Coord::new(0, 1)).unwrap();
        assert!(outcome.promoted);
        assert_eq!(board.get(Coord::new(0, 1)), Some(Piece::king(Color::Black)));

        // A king that reaches the edge again is not promoted twice
        let outcome = board.execute_move(Coord::new(0, 1), Coord::new(1, 0)).unwrap();
        assert!(!outcome.promoted);
        let outcome = board.execute_move(Coord::new(1, 0), Coord::new(0, 1)).unwrap();
        assert!(!outcome.promoted);
        assert_eq!(board.get(Coord::new(0, 1)), Some(Piece::king(Color::Black)));
    }

    #[test]
    fn further_jumps() {
        let board = board_with(&[
            ((4, 3), Piece::man(Color::Red)),
            ((5, 4), Piece::man(Color::Black)),
            ((3, 2), Piece::man(Color::Black)),
        ]);
        // Forward over (5, 4) is possible, backward over (3, 2) is not for a man
        assert!(board.has_further_jump(Coord::new(4, 3)));
        assert_eq!(
            Vec::from_iter(board.capture_destinations(Coord::new(4, 3))),
            vec![Coord::new(6, 5)]
        );

        let blocked = board_with(&[
            ((4, 3), Piece::man(Color::Red)),
            ((5, 4), Piece::man(Color::Black)),
            ((6, 5), Piece::man(Color::Black)),
        ]);
        assert!(!blocked.has_further_jump(Coord::new(4, 3)));

        let at_edge = board_with(&[
            ((6, 1), Piece::man(Color::Red)),
            ((7, 0), Piece::man(Color::Black)),
        ]);
        assert!(!at_edge.has_further_jump(Coord::new(6, 1)));
    }

    #[test]
    fn side_without_moves() {
        // A black man in the corner blocked by two red pieces
        let board = board_with(&[
            ((7, 0), Piece::man(Color::Black)),
            ((6, 1), Piece::man(Color::Red)),
            ((5, 2), Piece::man(Color::Red)),
        ]);
        assert!(!board.side_has_any_legal_move(Color::Black));
        assert!(board.side_has_any_legal_move(Color::Red));
        assert!(!Board::empty().side_has_any_legal_move(Color::Red));
    }

    #[test]
    fn failed_execution_leaves_board_untouched() {
        let mut board = Board::initial();
        let before = board;
        assert!(board.execute_move(Coord::new(2, 1), Coord::new(4, 3)).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn pieces_round_trip_through_list() {
        let board = Board::initial();
        assert_eq!(Board::new(&board.to_pieces_vec()), board);
    }
}
