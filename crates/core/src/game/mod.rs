//! Game rules

mod board;

pub use board::{Board, Cell, InvalidMove, Symbol, BOARD_CELLS};
