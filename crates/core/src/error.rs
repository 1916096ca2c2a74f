//! Error types for tictalk-core

use thiserror::Error;

use crate::game::InvalidMove;

/// Core error type
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed snapshot: {0}")]
    Decode(String),

    #[error("Invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Timeout(1500);
        assert_eq!(err.to_string(), "Timeout after 1500ms");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "test");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
    }

    #[test]
    fn test_invalid_move_conversion() {
        let err: CoreError = InvalidMove::Occupied(4).into();
        assert_eq!(err.to_string(), "Invalid move: square 4 is already taken");
    }

    #[test]
    fn test_message_too_large_display() {
        let err = CoreError::MessageTooLarge { size: 70000, max: 65536 };
        assert_eq!(err.to_string(), "Message too large: 70000 bytes (max: 65536)");
    }
}
