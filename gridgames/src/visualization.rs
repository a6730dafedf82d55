use crate::checkers::{self, Color, BOARD_SIZE};
use crate::gomoku::{self, Stone};
use crate::Coord;

/// Renders a checkers board, with `r`/`b` for men, `R`/`B` for kings and
/// `·` for empty dark squares.
pub fn visualize_checkers(board: &checkers::Board) -> String {
    draw_grid(BOARD_SIZE, |at| match board.get(at) {
        Some(piece) => {
            let symbol = match piece.color {
                Color::Red => 'r',
                Color::Black => 'b',
            };
            if piece.is_king {
                symbol.to_ascii_uppercase()
            } else {
                symbol
            }
        }
        None if checkers::Board::is_dark(at) => '·',
        None => ' ',
    })
}

/// Renders a gomoku board, with `●` for black, `○` for white and `·` for
/// empty cells.
pub fn visualize_gomoku(board: &gomoku::Board) -> String {
    draw_grid(board.size() as i8, |at| match board.get(at) {
        Some(Stone::Black) => '●',
        Some(Stone::White) => '○',
        None => '·',
    })
}

fn draw_grid(size: i8, symbol: impl Fn(Coord) -> char) -> String {
    // Column labels, only every fifth one beyond the first ten
    let mut result = String::from("    ");
    for col in 0..size {
        if col < 10 || col % 5 == 0 {
            result += &format!("{:<2}", col);
        } else {
            result += "  ";
        }
    }
    // Draw the top of the box
    result += "\n   ╭";
    for _ in 0..size {
        result += "──";
    }
    result += "─╮\n";

    for row in 0..size {
        result += &format!("{:>2} │", row);
        for col in 0..size {
            result.push(' ');
            result.push(symbol(Coord::new(row, col)));
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "   ╰";
    for _ in 0..size {
        result += "──";
    }
    result += "─╯";
    result
}

impl std::fmt::Display for checkers::Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_checkers(self))
    }
}

impl std::fmt::Debug for checkers::Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "checkers::Board")?;
        write!(f, "{}", visualize_checkers(self))
    }
}

impl std::fmt::Display for gomoku::Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", visualize_gomoku(self))
    }
}

impl std::fmt::Debug for gomoku::Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "gomoku::Board ({}x{})", self.size(), self.size())?;
        write!(f, "{}", visualize_gomoku(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlacedStone;

    #[test]
    fn initial_checkers_board() {
        let expected = "    0 1 2 3 4 5 6 7 
   ╭─────────────────╮
 0 │   r   r   r   r │
 1 │ r   r   r   r   │
 2 │   r   r   r   r │
 3 │ ·   ·   ·   ·   │
 4 │   ·   ·   ·   · │
 5 │ b   b   b   b   │
 6 │   b   b   b   b │
 7 │ b   b   b   b   │
   ╰─────────────────╯";
        assert_eq!(visualize_checkers(&checkers::Board::initial()), expected);
    }

    #[test]
    fn small_gomoku_board() {
        let board = gomoku::Board::from_stones(
            3,
            &[
                PlacedStone {
                    at: Coord::new(1, 1),
                    stone: Stone::Black,
                },
                PlacedStone {
                    at: Coord::new(0, 2),
                    stone: Stone::White,
                },
            ],
        );
        let expected = "    0 1 2 
   ╭───────╮
 0 │ · · ○ │
 1 │ · ● · │
 2 │ · · · │
   ╰───────╯";
        assert_eq!(board.to_string(), expected);
    }
}
