use serde::{Deserialize, Serialize};

/// The address of a single cell.
///
/// Row 0 is the top edge of the board, column 0 the left edge. Coordinates
/// are signed so that displacements and off-board cells can be expressed
/// without wrapping; every engine treats a negative or too large coordinate
/// as out of bounds instead of panicking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

/// The four diagonal unit steps, as `(d_row, d_col)`.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Whether this cell lies on a `size` x `size` board.
    pub fn is_within(self, size: i8) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < size && self.col < size
    }

    /// The cell displaced by `(d_row, d_col)`, or `None` on `i8` overflow.
    ///
    /// The result is not bounds-checked against any board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Coord> {
        Some(Coord {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }
}

impl From<(i8, i8)> for Coord {
    fn from((row, col): (i8, i8)) -> Self {
        Coord { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
