//! JSON codec for game snapshots
//!
//! The wire form is role-labelled: symbols are keyed by "server character" /
//! "client character" and a win is reported as "Server won" / "Client won".
//! The codec translates between that and the local/remote view of the side
//! it was built for.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::game::{Board, Cell, Symbol, BOARD_CELLS};
use crate::types::{GameSnapshot, GameStatus, Role};

const STATUS_ONGOING: &str = "ongoing";
const STATUS_DRAW: &str = "draw";

#[derive(Debug, Serialize, Deserialize)]
struct WireSnapshot {
    #[serde(rename = "server character")]
    server_character: String,
    #[serde(rename = "client character")]
    client_character: String,
    board: Vec<String>,
    #[serde(rename = "game status")]
    game_status: String,
}

/// Snapshot codec bound to the connection role of the local side
#[derive(Debug, Clone, Copy)]
pub struct SnapshotCodec {
    role: Role,
}

impl SnapshotCodec {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Serialize a snapshot to JSON bytes
    pub fn encode(&self, snapshot: &GameSnapshot) -> Result<Vec<u8>> {
        let (server, client) = match self.role {
            Role::Listener => (snapshot.local_symbol, snapshot.remote_symbol),
            Role::Initiator => (snapshot.remote_symbol, snapshot.local_symbol),
        };

        let wire = WireSnapshot {
            server_character: server.to_string(),
            client_character: client.to_string(),
            board: snapshot
                .board
                .cells()
                .iter()
                .map(|cell| cell.as_char().to_string())
                .collect(),
            game_status: self.status_label(snapshot.status),
        };

        Ok(serde_json::to_vec(&wire)?)
    }

    /// Parse JSON bytes into a snapshot seen from the local side
    pub fn decode(&self, bytes: &[u8]) -> Result<GameSnapshot> {
        let wire: WireSnapshot =
            serde_json::from_slice(bytes).map_err(|e| CoreError::Decode(e.to_string()))?;

        let server = parse_symbol(&wire.server_character)?;
        let client = parse_symbol(&wire.client_character)?;
        let (local_symbol, remote_symbol) = match self.role {
            Role::Listener => (server, client),
            Role::Initiator => (client, server),
        };

        Ok(GameSnapshot {
            local_symbol,
            remote_symbol,
            board: parse_board(&wire.board)?,
            status: self.parse_status(&wire.game_status)?,
        })
    }

    fn status_label(&self, status: GameStatus) -> String {
        match status {
            GameStatus::Ongoing => STATUS_ONGOING.to_string(),
            GameStatus::Draw => STATUS_DRAW.to_string(),
            GameStatus::LocalWon => format!("{} won", self.role.wire_label()),
            GameStatus::RemoteWon => format!("{} won", self.role.peer().wire_label()),
        }
    }

    fn parse_status(&self, label: &str) -> Result<GameStatus> {
        match label {
            STATUS_ONGOING => Ok(GameStatus::Ongoing),
            STATUS_DRAW => Ok(GameStatus::Draw),
            _ => match label.strip_suffix(" won") {
                Some(winner) if winner == self.role.wire_label() => Ok(GameStatus::LocalWon),
                Some(winner) if winner == self.role.peer().wire_label() => {
                    Ok(GameStatus::RemoteWon)
                }
                _ => Err(CoreError::Decode(format!("unknown game status {:?}", label))),
            },
        }
    }
}

fn parse_symbol(raw: &str) -> Result<Symbol> {
    let mut chars = raw.chars();
    let symbol = match (chars.next(), chars.next()) {
        (Some(c), None) => Symbol::from_char(c),
        _ => None,
    };
    symbol.ok_or_else(|| CoreError::Decode(format!("invalid player character {:?}", raw)))
}

fn parse_board(raw: &[String]) -> Result<Board> {
    if raw.len() != BOARD_CELLS {
        return Err(CoreError::Decode(format!(
            "board has {} cells, expected {}",
            raw.len(),
            BOARD_CELLS
        )));
    }

    let mut cells = [Cell::Empty; BOARD_CELLS];
    for (cell, value) in cells.iter_mut().zip(raw) {
        *cell = match value.as_str() {
            " " => Cell::Empty,
            other => Cell::Marked(parse_symbol(other)?),
        };
    }
    Ok(Board::from_cells(cells))
}
