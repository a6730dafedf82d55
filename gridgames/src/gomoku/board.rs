use serde::{Deserialize, Serialize};

use crate::{Coord, IllegalPlacement, PlacedStone};

/// The largest supported board edge.
pub const MAX_BOARD_SIZE: u8 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    /// Moves first.
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }
}

/// One of the four lines through a cell along which runs are counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// The unit step along this axis, as `(d_row, d_col)`. The opposite
    /// direction is the negated step.
    pub fn step(self) -> (i8, i8) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// A square gomoku board, stored row-major.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: i8,
    cells: Vec<Option<Stone>>,
    /// Number of `Some` entries in `cells`.
    stones: usize,
}

impl Board {
    /// Creates an empty `size` x `size` board.
    ///
    /// Panics if `size` is 0 or larger than [`MAX_BOARD_SIZE`].
    pub fn new(size: u8) -> Self {
        assert!(
            size > 0 && size <= MAX_BOARD_SIZE,
            "unsupported board size {}",
            size
        );
        let size = size as i8;
        Self {
            size,
            cells: vec![None; (size as usize) * (size as usize)],
            stones: 0,
        }
    }

    /// Creates a board from a list of stones.
    ///
    /// Panics if a stone is off the board or two share a cell.
    pub fn from_stones(size: u8, stones: &[PlacedStone]) -> Self {
        let mut board = Self::new(size);
        for placed in stones {
            if let Err(err) = board.place_stone(placed.at, placed.stone) {
                panic!("invalid stone list: {}", err);
            }
        }
        board
    }

    pub fn size(&self) -> u8 {
        self.size as u8
    }

    /// `None` for empty and for off-board cells.
    pub fn get(&self, at: Coord) -> Option<Stone> {
        self.index(at).and_then(|idx| self.cells[idx])
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.is_within(self.size)
    }

    pub fn num_stones(&self) -> usize {
        self.stones
    }

    /// Puts a stone on an empty cell. This is the only way a board changes.
    pub fn place_stone(&mut self, at: Coord, stone: Stone) -> Result<(), IllegalPlacement> {
        let idx = self.index(at).ok_or(IllegalPlacement::OutOfBounds { at })?;
        if self.cells[idx].is_some() {
            return Err(IllegalPlacement::Occupied { at });
        }
        self.cells[idx] = Some(stone);
        self.stones += 1;
        Ok(())
    }

    /// The length of the run of `stone` through `at` along `axis`.
    ///
    /// The cell `at` itself always counts as one, whether or not the stone
    /// is already there, so this also answers "how long would the run be
    /// if `stone` were placed here". Each direction stops at the edge or at
    /// the first cell not holding `stone`; a gap ends the run.
    pub fn run_length(&self, at: Coord, axis: Axis, stone: Stone) -> usize {
        let (d_row, d_col) = axis.step();
        1 + self.count_direction(at, d_row, d_col, stone)
            + self.count_direction(at, -d_row, -d_col, stone)
    }

    /// The longest run of `stone` through `at` over all four axes.
    pub fn longest_run(&self, at: Coord, stone: Stone) -> usize {
        Axis::ALL
            .iter()
            .map(|&axis| self.run_length(at, axis, stone))
            .max()
            .unwrap_or(1)
    }

    /// Whether `stone` on `at` completes a run of at least `win_length`.
    pub fn evaluate_win(&self, at: Coord, stone: Stone, win_length: usize) -> bool {
        Axis::ALL
            .iter()
            .any(|&axis| self.run_length(at, axis, stone) >= win_length)
    }

    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// All empty cells, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(idx, _)| self.coord(idx))
    }

    /// All stones, in row-major order.
    pub fn to_stones_vec(&self) -> Vec<PlacedStone> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| {
                cell.map(|stone| PlacedStone {
                    at: self.coord(idx),
                    stone,
                })
            })
            .collect()
    }

    fn count_direction(&self, at: Coord, d_row: i8, d_col: i8, stone: Stone) -> usize {
        let mut count = 0;
        let mut cursor = at.offset(d_row, d_col);
        while let Some(cell) = cursor.filter(|&c| self.get(c) == Some(stone)) {
            count += 1;
            cursor = cell.offset(d_row, d_col);
        }
        count
    }

    fn index(&self, at: Coord) -> Option<usize> {
        at.is_within(self.size)
            .then(|| at.row as usize * self.size as usize + at.col as usize)
    }

    fn coord(&self, idx: usize) -> Coord {
        // idx < size * size <= 64 * 64, so both parts fit in an i8
        Coord::new(
            (idx / self.size as usize) as i8,
            (idx % self.size as usize) as i8,
        )
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    fn place_all(board: &mut Board, cells: &[(i8, i8)], stone: Stone) {
        for &at in cells {
            board.place_stone(at.into(), stone).unwrap();
        }
    }

    quickcheck! {
        fn neighbours_in_a_run_see_the_same_run(cells: Vec<(u8, u8, bool)>) -> bool {
            let mut board = Board::new(9);
            for (row, col, black) in cells {
                let stone = if black { Stone::Black } else { Stone::White };
                let _ = board.place_stone(Coord::new((row % 9) as i8, (col % 9) as i8), stone);
            }
            board.to_stones_vec().into_iter().all(|placed| {
                Axis::ALL.iter().all(|&axis| {
                    let len = board.run_length(placed.at, axis, placed.stone);
                    let (d_row, d_col) = axis.step();
                    match placed.at.offset(d_row, d_col) {
                        Some(next) if board.get(next) == Some(placed.stone) => {
                            board.run_length(next, axis, placed.stone) == len
                        }
                        _ => len >= 1,
                    }
                })
            })
        }
    }

    #[test]
    fn placement_rules() {
        let mut board = Board::new(15);
        assert_eq!(board.place_stone(Coord::new(7, 7), Stone::Black), Ok(()));
        assert_eq!(
            board.place_stone(Coord::new(7, 7), Stone::White),
            Err(IllegalPlacement::Occupied {
                at: Coord::new(7, 7)
            })
        );
        assert_eq!(
            board.place_stone(Coord::new(15, 0), Stone::White),
            Err(IllegalPlacement::OutOfBounds {
                at: Coord::new(15, 0)
            })
        );
        assert_eq!(board.get(Coord::new(7, 7)), Some(Stone::Black));
        assert_eq!(board.get(Coord::new(-1, 3)), None);
        assert_eq!(board.num_stones(), 1);
    }

    #[test]
    fn four_axes() {
        let mut board = Board::new(15);
        place_all(&mut board, &[(7, 3), (7, 4), (7, 6)], Stone::Black);
        place_all(&mut board, &[(5, 5), (6, 5), (8, 5), (9, 5)], Stone::Black);
        place_all(&mut board, &[(4, 2), (6, 4), (8, 6)], Stone::Black);
        place_all(&mut board, &[(6, 6), (8, 4), (9, 3)], Stone::Black);
        let at = Coord::new(7, 5);
        assert_eq!(board.run_length(at, Axis::Horizontal, Stone::Black), 4);
        assert_eq!(board.run_length(at, Axis::Vertical, Stone::Black), 5);
        // (4, 2) is cut off by the empty (5, 3)
        assert_eq!(board.run_length(at, Axis::Diagonal, Stone::Black), 3);
        assert_eq!(board.run_length(at, Axis::AntiDiagonal, Stone::Black), 4);
        assert_eq!(board.longest_run(at, Stone::Black), 5);
        assert!(board.evaluate_win(at, Stone::Black, 5));
        assert!(!board.evaluate_win(at, Stone::Black, 6));
        assert!(!board.evaluate_win(at, Stone::White, 5));
    }

    #[test]
    fn opposing_stone_breaks_run() {
        let mut board = Board::new(15);
        place_all(&mut board, &[(0, 0), (0, 1), (0, 3), (0, 4)], Stone::White);
        board.place_stone(Coord::new(0, 2), Stone::Black).unwrap();
        assert_eq!(
            board.run_length(Coord::new(0, 1), Axis::Horizontal, Stone::White),
            2
        );
    }

    #[test]
    fn runs_stop_at_the_edge() {
        let mut board = Board::new(5);
        place_all(&mut board, &[(0, 4), (1, 3), (2, 2), (3, 1), (4, 0)], Stone::White);
        assert!(board.evaluate_win(Coord::new(2, 2), Stone::White, 5));
        assert_eq!(
            board.run_length(Coord::new(4, 0), Axis::Horizontal, Stone::White),
            1
        );
    }

    #[test]
    fn full_board() {
        let mut board = Board::new(2);
        place_all(&mut board, &[(0, 0), (1, 1)], Stone::Black);
        assert!(!board.is_full());
        assert_eq!(Vec::from_iter(board.empty_cells()), vec![Coord::new(0, 1), Coord::new(1, 0)]);
        place_all(&mut board, &[(0, 1), (1, 0)], Stone::White);
        assert!(board.is_full());
        assert_eq!(board.empty_cells().count(), 0);
    }

    #[test]
    fn stones_round_trip_through_list() {
        let mut board = Board::new(9);
        place_all(&mut board, &[(4, 4), (0, 8)], Stone::Black);
        place_all(&mut board, &[(3, 3)], Stone::White);
        assert_eq!(Board::from_stones(9, &board.to_stones_vec()), board);
    }
}
