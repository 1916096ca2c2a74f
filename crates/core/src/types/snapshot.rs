//! Game snapshot exchanged once per turn

use crate::game::{Board, Symbol};

/// Outcome of a game, relative to the side holding the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    LocalWon,
    RemoteWon,
    Draw,
}

impl GameStatus {
    /// True for every status except `Ongoing`
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// Same outcome seen from the other side
    pub fn flipped(self) -> Self {
        match self {
            GameStatus::LocalWon => GameStatus::RemoteWon,
            GameStatus::RemoteWon => GameStatus::LocalWon,
            other => other,
        }
    }
}

/// Full game state as sent after every move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub local_symbol: Symbol,
    pub remote_symbol: Symbol,
    pub board: Board,
    pub status: GameStatus,
}

impl GameSnapshot {
    /// Build a snapshot, deriving `status` from `board`
    pub fn new(local_symbol: Symbol, remote_symbol: Symbol, board: Board) -> Self {
        let status = board.status_for(local_symbol);
        Self {
            local_symbol,
            remote_symbol,
            board,
            status,
        }
    }
}
