use std::fmt::{self, Debug};

use crate::bitset::bitset_ops;
use crate::Coord;

pub const BOARD_SIZE: i8 = 8;

/// A [`Copy`] set of cells on the 8x8 checkers board, one bit per cell.
///
/// Bit `row * 8 + col` stands for the cell `(row, col)`, so the lowest byte
/// is row 0. It can be turned into the contained coordinates, in row-major
/// order, by means of its [`IntoIterator`] instance.
///
/// Like the boards built from it, its "mutating" methods return a new value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareSet {
    bits: u64,
}

bitset_ops!(SquareSet);

impl SquareSet {
    /// All cells where `(row + col)` is odd.
    ///
    /// Even rows have their dark cells in the odd columns (`0xAA`), odd rows in
    /// the even columns (`0x55`).
    pub const DARK: SquareSet = SquareSet {
        bits: 0x55AA_55AA_55AA_55AA,
    };

    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// The dark cells of the given rows, `rows` being a half-open range.
    pub fn dark_rows(rows: std::ops::Range<i8>) -> Self {
        let mut set = Self::empty();
        for row in rows {
            for col in 0..BOARD_SIZE {
                let at = Coord::new(row, col);
                if Self::DARK.contains(at) {
                    set = set.insert(at);
                }
            }
        }
        set
    }

    /// Adds the cell to the set.
    ///
    /// Panics if `at` is not on the board.
    #[must_use]
    pub fn insert(self, at: Coord) -> Self {
        Self {
            bits: self.bits | (1u64 << Self::index(at)),
        }
    }

    /// Panics if `at` is not on the board.
    #[must_use]
    pub fn remove(self, at: Coord) -> Self {
        Self {
            bits: self.bits & !(1u64 << Self::index(at)),
        }
    }

    /// Off-board cells are never contained.
    pub fn contains(self, at: Coord) -> bool {
        at.is_within(BOARD_SIZE) && self.bits & (1u64 << Self::index(at)) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    fn index(at: Coord) -> u32 {
        assert!(at.is_within(BOARD_SIZE), "{} is not on the board", at);
        (at.row as u32) * 8 + at.col as u32
    }
}

impl Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::with_capacity(8 * 17);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                s.push(if self.contains(Coord::new(row, col)) { '1' } else { '.' });
                s.push(if col == BOARD_SIZE - 1 { '\n' } else { ' ' });
            }
        }
        write!(f, "{}", s)
    }
}

impl FromIterator<Coord> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Coord>>(iter: T) -> Self {
        iter.into_iter().fold(Self::empty(), Self::insert)
    }
}

/// Iterator produced by [`SquareSet::into_iter()`].
pub struct SquareSetIter {
    bits: u64,
}

impl IntoIterator for SquareSet {
    type Item = Coord;

    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        SquareSetIter { bits: self.bits }
    }
}

impl Iterator for SquareSetIter {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // Can't exceed 63, so the casts are fine
            let idx = self.bits.trailing_zeros() as i8;
            self.bits &= self.bits - 1;
            Some(Coord::new(idx / 8, idx % 8))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for SquareSetIter {}
