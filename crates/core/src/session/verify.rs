//! Validation of peer snapshots against the local game

use crate::game::{Board, Cell, Symbol};
use crate::types::GameSnapshot;
use crate::{CoreError, Result};

/// Accept `snapshot` only if it is `board` plus exactly one new mark of
/// `remote`, with unchanged symbols and a status that matches the board.
pub(crate) fn verify_peer_snapshot(
    board: &Board,
    local: Symbol,
    remote: Symbol,
    snapshot: &GameSnapshot,
) -> Result<()> {
    if snapshot.local_symbol != local || snapshot.remote_symbol != remote {
        return Err(CoreError::ProtocolViolation(format!(
            "peer changed player symbols (expected local {} / remote {}, got {} / {})",
            local, remote, snapshot.local_symbol, snapshot.remote_symbol
        )));
    }

    let changed = board.changed_cells(&snapshot.board);
    let index = match changed.as_slice() {
        [index] => *index,
        _ => {
            return Err(CoreError::ProtocolViolation(format!(
                "expected exactly one new move, found {} changed squares",
                changed.len()
            )))
        }
    };

    if board.get(index) != Some(Cell::Empty) {
        return Err(CoreError::ProtocolViolation(format!(
            "peer overwrote occupied square {}",
            index
        )));
    }
    if snapshot.board.get(index) != Some(Cell::Marked(remote)) {
        return Err(CoreError::ProtocolViolation(format!(
            "square {} was not marked with the peer's symbol {}",
            index, remote
        )));
    }

    let expected = snapshot.board.status_for(local);
    if snapshot.status != expected {
        return Err(CoreError::ProtocolViolation(format!(
            "peer reported {:?} but the board is {:?}",
            snapshot.status, expected
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameStatus;

    fn board_with(moves: &[(usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(index, symbol) in moves {
            board.apply_move(index, symbol).unwrap();
        }
        board
    }

    #[test]
    fn test_single_legal_move_accepted() {
        let before = board_with(&[(0, Symbol::X)]);
        let after = board_with(&[(0, Symbol::X), (4, Symbol::O)]);
        let snapshot = GameSnapshot::new(Symbol::X, Symbol::O, after);
        assert!(verify_peer_snapshot(&before, Symbol::X, Symbol::O, &snapshot).is_ok());
    }

    #[test]
    fn test_two_moves_rejected() {
        let before = Board::new();
        let after = board_with(&[(0, Symbol::O), (1, Symbol::O)]);
        let snapshot = GameSnapshot::new(Symbol::X, Symbol::O, after);
        let result = verify_peer_snapshot(&before, Symbol::X, Symbol::O, &snapshot);
        assert!(matches!(result, Err(CoreError::ProtocolViolation(_))));
    }

    #[test]
    fn test_no_move_rejected() {
        let before = board_with(&[(0, Symbol::X)]);
        let snapshot = GameSnapshot::new(Symbol::X, Symbol::O, before.clone());
        assert!(verify_peer_snapshot(&before, Symbol::X, Symbol::O, &snapshot).is_err());
    }

    #[test]
    fn test_wrong_symbol_rejected() {
        let before = Board::new();
        let after = board_with(&[(3, Symbol::X)]);
        let snapshot = GameSnapshot::new(Symbol::X, Symbol::O, after);
        assert!(verify_peer_snapshot(&before, Symbol::X, Symbol::O, &snapshot).is_err());
    }

    #[test]
    fn test_overwrite_rejected() {
        let before = board_with(&[(4, Symbol::X)]);
        let after = board_with(&[(4, Symbol::O)]);
        let snapshot = GameSnapshot::new(Symbol::X, Symbol::O, after);
        assert!(verify_peer_snapshot(&before, Symbol::X, Symbol::O, &snapshot).is_err());
    }

    #[test]
    fn test_swapped_symbols_rejected() {
        let before = Board::new();
        let after = board_with(&[(3, Symbol::O)]);
        let snapshot = GameSnapshot::new(Symbol::O, Symbol::X, after);
        assert!(verify_peer_snapshot(&before, Symbol::X, Symbol::O, &snapshot).is_err());
    }

    #[test]
    fn test_false_status_rejected() {
        let before = Board::new();
        let after = board_with(&[(3, Symbol::O)]);
        let mut snapshot = GameSnapshot::new(Symbol::X, Symbol::O, after);
        snapshot.status = GameStatus::RemoteWon;
        assert!(verify_peer_snapshot(&before, Symbol::X, Symbol::O, &snapshot).is_err());
    }
}
