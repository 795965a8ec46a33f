use std::fmt;

use thiserror::Error;

use crate::{Mark, Move};

/// Board side length.
pub const SIZE: usize = 3;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Raised when a move targets an occupied cell. The caller is expected to
/// offer only moves from [`Board::legal_moves`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("illegal move: cell {0} is already occupied")]
pub struct IllegalMoveError(pub Move);

/// How a position stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Mark),
    Draw,
    InProgress,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Won(mark) => write!(f, "{mark} wins"),
            Outcome::Draw => write!(f, "draw"),
            Outcome::InProgress => write!(f, "in progress"),
        }
    }
}

/// An immutable 3x3 tic-tac-toe position.
///
/// Every transition produces a fresh value, so search branches never observe
/// each other's side effects. Whose turn it is falls out of the occupied-cell
/// count rather than being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Mark>; SIZE]; SIZE],
}

impl Board {
    /// The empty starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mark at a cell, or `None` when the cell is empty.
    pub fn cell(&self, mv: Move) -> Option<Mark> {
        self.cells[mv.row as usize][mv.col as usize]
    }

    /// Number of non-empty cells, between 0 and 9.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Whose turn it is. X opens, so an even occupied count means X moves.
    pub fn turn(&self) -> Mark {
        if self.occupied_count() % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Every empty coordinate, in row-major order.
    ///
    /// Callers must treat the result as a set; the search engine's selection
    /// does not depend on this order beyond its documented tie-break.
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::all().filter(|&mv| self.cell(mv).is_none()).collect()
    }

    /// Places the current player's mark at `mv`, returning the new position.
    /// The receiver is left untouched.
    pub fn apply(&self, mv: Move) -> Result<Board, IllegalMoveError> {
        if self.cell(mv).is_some() {
            return Err(IllegalMoveError(mv));
        }
        let mut next = *self;
        next.cells[mv.row as usize][mv.col as usize] = Some(self.turn());
        Ok(next)
    }

    /// The mark holding a completed line, if any. All 8 lines are checked.
    pub fn winner(&self) -> Option<Mark> {
        for line in &LINES {
            let [a, b, c] = line.map(|(row, col)| self.cells[row][col]);
            if let Some(mark) = a {
                if b == Some(mark) && c == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == SIZE * SIZE
    }

    /// True once the game has concluded with a win or a draw.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Derives the game's standing from the grid.
    pub fn outcome(&self) -> Outcome {
        match self.winner() {
            Some(mark) => Outcome::Won(mark),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Terminal value: +1 when X has won, -1 when O has won, 0 otherwise.
    ///
    /// Only meaningful on terminal boards; the search confirms terminality
    /// before consulting it.
    pub fn score(&self) -> i32 {
        match self.winner() {
            Some(Mark::X) => 1,
            Some(Mark::O) => -1,
            None => 0,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                match cell {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, ".")?,
                }
            }
            if i + 1 < SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(row: u8, col: u8) -> Move {
        Move::new(row, col).unwrap()
    }

    fn board_from(rows: [&str; 3]) -> Board {
        let mut cells = [[None; SIZE]; SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                cells[r][c] = match ch {
                    'X' => Some(Mark::X),
                    'O' => Some(Mark::O),
                    '.' => None,
                    other => panic!("bad cell char {other:?}"),
                };
            }
        }
        Board { cells }
    }

    fn line_board(line: [(usize, usize); 3], mark: Mark) -> Board {
        let mut cells = [[None; SIZE]; SIZE];
        for (r, c) in line {
            cells[r][c] = Some(mark);
        }
        Board { cells }
    }

    #[test]
    fn new_board_is_empty_and_x_moves() {
        let board = Board::new();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.turn(), Mark::X);
        assert_eq!(board.legal_moves().len(), 9);
        assert!(!board.is_terminal());
    }

    #[test]
    fn turn_alternates_as_cells_fill() {
        let mut board = Board::new();
        let mut expected = Mark::X;
        for target in Move::all() {
            assert_eq!(board.turn(), expected);
            board = board.apply(target).unwrap();
            expected = expected.opponent();
        }
    }

    #[test]
    fn apply_leaves_original_unchanged() {
        let board = Board::new();
        let next = board.apply(mv(1, 1)).unwrap();

        assert_eq!(board, Board::new());
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(next.occupied_count(), 1);
        assert_eq!(next.cell(mv(1, 1)), Some(Mark::X));
    }

    #[test]
    fn apply_places_the_mark_whose_turn_it_is() {
        let board = Board::new().apply(mv(0, 0)).unwrap();
        assert_eq!(board.turn(), Mark::O);

        let next = board.apply(mv(2, 2)).unwrap();
        assert_eq!(next.cell(mv(2, 2)), Some(Mark::O));
    }

    #[test]
    fn apply_rejects_occupied_cell() {
        let board = Board::new().apply(mv(0, 0)).unwrap();
        assert_eq!(board.apply(mv(0, 0)), Err(IllegalMoveError(mv(0, 0))));
    }

    #[test]
    fn winner_detects_all_eight_lines() {
        for (i, &line) in LINES.iter().enumerate() {
            let board = line_board(line, Mark::X);
            assert_eq!(board.winner(), Some(Mark::X), "line {i} for X");

            let board = line_board(line, Mark::O);
            assert_eq!(board.winner(), Some(Mark::O), "line {i} for O");
        }
    }

    #[test]
    fn winner_none_without_completed_line() {
        let board = board_from(["XOX", "XOO", "OXX"]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn terminal_iff_winner_or_full() {
        let in_progress = board_from(["XO.", "...", "..."]);
        assert!(!in_progress.is_terminal());

        let won_early = board_from(["XXX", "OO.", "..."]);
        assert!(won_early.is_terminal());
        assert!(!won_early.is_full());

        let full_draw = board_from(["XOX", "XOO", "OXX"]);
        assert!(full_draw.is_terminal());
        assert!(full_draw.is_full());
    }

    #[test]
    fn legal_moves_shrink_and_exclude_occupied() {
        let board = Board::new().apply(mv(1, 1)).unwrap();
        let moves = board.legal_moves();
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&mv(1, 1)));
    }

    #[test]
    fn legal_moves_empty_on_full_board() {
        let board = board_from(["XOX", "XOO", "OXX"]);
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn full_board_with_x_row_scores_one() {
        let board = board_from(["XXX", "OOX", "XOO"]);
        assert_eq!(board.winner(), Some(Mark::X));
        assert_eq!(board.score(), 1);
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), Outcome::Won(Mark::X));
    }

    #[test]
    fn o_column_scores_minus_one() {
        let board = board_from(["OX.", "OXX", "O.."]);
        assert_eq!(board.winner(), Some(Mark::O));
        assert_eq!(board.score(), -1);
        assert_eq!(board.outcome(), Outcome::Won(Mark::O));
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board = board_from(["XOX", "XOO", "OXX"]);
        assert_eq!(board.winner(), None);
        assert_eq!(board.score(), 0);
        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn display_renders_rows() {
        let board = board_from(["XO.", ".X.", "..O"]);
        assert_eq!(format!("{board}"), "XO.\n.X.\n..O");
    }
}
