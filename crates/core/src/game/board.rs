//! Tic-Tac-Toe board engine
//!
//! Pure game-state logic for the 3x3 grid. No I/O, no networking.

use std::fmt;
use thiserror::Error;

use crate::types::GameStatus;

/// Number of cells on the board
pub const BOARD_CELLS: usize = 9;

/// Rows, columns, then diagonals
const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Mark placed by a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The other player's symbol
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'X' => Some(Symbol::X),
            'O' => Some(Symbol::O),
            _ => None,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Symbol),
}

impl Cell {
    /// Character used on the wire and in rendering (space for empty)
    pub fn as_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Marked(symbol) => symbol.as_char(),
        }
    }
}

/// Rejected move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidMove {
    #[error("square {0} is off the board (expected 0-8)")]
    OutOfRange(usize),

    #[error("square {0} is already taken")]
    Occupied(usize),
}

/// 3x3 board in row-major order (indices 0-8)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cell values
    pub fn from_cells(cells: [Cell; BOARD_CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Place `symbol` on `index`.
    ///
    /// Only an empty cell accepts a move. On error the board is untouched.
    pub fn apply_move(&mut self, index: usize, symbol: Symbol) -> Result<(), InvalidMove> {
        match self.cells.get_mut(index) {
            None => Err(InvalidMove::OutOfRange(index)),
            Some(Cell::Marked(_)) => Err(InvalidMove::Occupied(index)),
            Some(cell) => {
                *cell = Cell::Marked(symbol);
                Ok(())
            }
        }
    }

    /// Symbol owning a complete row, column or diagonal, if any
    pub fn winner(&self) -> Option<Symbol> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| match self.cells[a] {
            Cell::Marked(symbol) if self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a] => {
                Some(symbol)
            }
            _ => None,
        })
    }

    /// True when every cell is taken.
    ///
    /// Does not look for a winner; a full board with a complete line is a win.
    pub fn is_draw(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// Game status from the point of view of the player holding `local`
    pub fn status_for(&self, local: Symbol) -> GameStatus {
        match self.winner() {
            Some(symbol) if symbol == local => GameStatus::LocalWon,
            Some(_) => GameStatus::RemoteWon,
            None if self.is_draw() => GameStatus::Draw,
            None => GameStatus::Ongoing,
        }
    }

    /// Indices whose cells differ between `self` and `other`
    pub fn changed_cells(&self, other: &Board) -> Vec<usize> {
        (0..BOARD_CELLS)
            .filter(|&i| self.cells[i] != other.cells[i])
            .collect()
    }

    /// Human-readable grid
    pub fn render(&self) -> String {
        self.cells
            .chunks(3)
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_char().to_string())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n---------\n")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[(usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(index, symbol) in moves {
            board.apply_move(index, symbol).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_result() {
        let board = Board::new();
        assert_eq!(board.winner(), None);
        assert!(!board.is_draw());
        assert_eq!(board.status_for(Symbol::X), GameStatus::Ongoing);
    }

    #[test]
    fn test_diagonal_win() {
        use Symbol::*;
        let board = play(&[(0, X), (1, O), (4, X), (2, O), (8, X)]);
        assert_eq!(board.winner(), Some(X));
        assert_eq!(board.status_for(X), GameStatus::LocalWon);
        assert_eq!(board.status_for(O), GameStatus::RemoteWon);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        use Symbol::*;
        let board = play(&[
            (0, X), (1, O), (2, X),
            (3, O), (4, X), (5, O),
            (6, O), (7, X), (8, O),
        ]);
        assert!(board.is_draw());
        assert_eq!(board.winner(), None);
        assert_eq!(board.status_for(X), GameStatus::Draw);
        assert_eq!(board.status_for(O), GameStatus::Draw);
    }

    #[test]
    fn test_full_board_with_line_reports_winner() {
        use Symbol::*;
        // X completes the top row with the last empty cell
        let board = play(&[
            (0, X), (1, X), (3, O),
            (4, O), (5, X), (6, O),
            (7, X), (8, O), (2, X),
        ]);
        assert!(board.is_draw());
        assert_eq!(board.winner(), Some(X));
        assert_eq!(board.status_for(O), GameStatus::RemoteWon);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut board = Board::new();
        board.apply_move(4, Symbol::X).unwrap();
        let before = board.clone();

        let err = board.apply_move(4, Symbol::O).unwrap_err();
        assert_eq!(err, InvalidMove::Occupied(4));
        assert_eq!(board, before);
        assert_eq!(board.get(4), Some(Cell::Marked(Symbol::X)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut board = Board::new();
        assert_eq!(board.apply_move(9, Symbol::X), Err(InvalidMove::OutOfRange(9)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_column_win() {
        use Symbol::*;
        let board = play(&[(1, O), (0, X), (4, O), (2, X), (7, O)]);
        assert_eq!(board.winner(), Some(O));
    }

    #[test]
    fn test_render() {
        use Symbol::*;
        let board = play(&[(0, X), (4, O), (8, X)]);
        assert_eq!(
            board.render(),
            "X |   |  \n---------\n  | O |  \n---------\n  |   | X"
        );
        assert_eq!(board.to_string(), board.render());
    }

    #[test]
    fn test_changed_cells() {
        use Symbol::*;
        let before = play(&[(0, X)]);
        let after = play(&[(0, X), (5, O)]);
        assert_eq!(before.changed_cells(&after), vec![5]);
        assert!(after.changed_cells(&after).is_empty());
    }

    #[test]
    fn test_symbol_chars() {
        assert_eq!(Symbol::from_char('X'), Some(Symbol::X));
        assert_eq!(Symbol::from_char('o'), None);
        assert_eq!(Symbol::O.opponent(), Symbol::X);
        assert_eq!(Cell::Empty.as_char(), ' ');
    }
}
