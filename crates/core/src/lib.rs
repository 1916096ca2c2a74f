//! tictalk core - chat and Tic-Tac-Toe over one connection
//!
//! This crate provides:
//! - Board engine (moves, win/draw detection, rendering)
//! - Wire protocol (length-prefixed frames, JSON snapshots, trigger strings)
//! - Session state machine switching between chat and game modes
//! - Transport and operator abstractions, with test doubles
//! - Error types

/// Default listen/connect port
pub const DEFAULT_PORT: u16 = 2000;
pub const APP_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod game;
pub mod operator;
pub mod protocol;
pub mod session;
pub mod transport;
pub mod types;

// Re-export common types
pub use error::{CoreError, Result};
pub use game::{Board, Cell, InvalidMove, Symbol};
pub use operator::{ConsoleOperator, Operator, ScriptedOperator};
pub use protocol::{FrameCodec, SnapshotCodec};
pub use session::{Mode, Session, SessionConfig, SessionState, Step, Termination};
pub use transport::{connect, Listener, MockTransport, StreamTransport, TcpTransport, Transport};
pub use types::{GameSnapshot, GameStatus, Inbound, Role};
