use crate::checkers::{Board, Color, Piece, SquareSet};

/// A random checkers position with a random side to move.
#[derive(Clone, Debug)]
pub struct CheckersPosition {
    pub board: Board,
    pub to_move: Color,
}

impl quickcheck::Arbitrary for CheckersPosition {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut board = Board::empty();
        for at in SquareSet::DARK {
            // Roughly a quarter of the dark squares are occupied
            if u8::arbitrary(g) % 4 != 0 {
                continue;
            }
            let mut piece = Piece::arbitrary(g);
            // Men never stand on the row they get promoted on
            if at.row == piece.color.promotion_row() {
                piece.is_king = true;
            }
            board.put(at, piece);
        }
        CheckersPosition {
            board,
            to_move: Color::arbitrary(g),
        }
    }
}

impl quickcheck::Arbitrary for Color {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&[Color::Red, Color::Black]).unwrap()
    }
}

impl quickcheck::Arbitrary for Piece {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Self {
            color: Color::arbitrary(g),
            // Kings are rarer than men
            is_king: u8::arbitrary(g) % 4 == 0,
        }
    }
}
