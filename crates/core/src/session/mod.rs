//! Session protocol state machine
//!
//! One session is one connection. The exchange is half-duplex: each side
//! waits for a message, handles it (prompting its operator when a reply is
//! needed), sends exactly one reply and waits again. The initiator speaks
//! first.
//!
//! # Modes
//! - Chat: payloads are free text, except for the trigger strings.
//! - Game: every payload is a JSON snapshot. Turns alternate because each
//!   received snapshot is answered by exactly one local move.
//!
//! The side whose operator types `play tictactoe` plays X and moves first,
//! once the peer has answered with the instructions text. The peer plays O.

mod config;
mod verify;

pub use config::SessionConfig;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::game::{Board, Symbol};
use crate::operator::Operator;
use crate::protocol::{game_start_trigger_text, instructions_text, SnapshotCodec, QUIT_SIGNAL};
use crate::transport::Transport;
use crate::types::{GameSnapshot, GameStatus, Inbound, Role};
use crate::{CoreError, Result};
use verify::verify_peer_snapshot;

const CHAT_PROMPT: &str = "Enter Input >";
const MOVE_PROMPT: &str = "Make your move >";

/// Payload interpretation currently in force
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Chat,
    Game,
}

/// Position of the session in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Chat mode
    Chat,
    /// Game mode, the local operator is choosing a square
    AwaitingLocalMove,
    /// Game mode, waiting for the peer's snapshot
    AwaitingRemotePayload,
    Terminated,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Local operator typed the quit command
    LocalQuit,
    /// Peer sent the quit signal
    PeerQuit,
    /// Peer closed the connection
    PeerClosed,
    /// Local input ran out
    OperatorClosed,
}

/// Result of handling one inbound message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Finished(Termination),
}

#[derive(Debug, Clone)]
struct ActiveGame {
    board: Board,
    local: Symbol,
    remote: Symbol,
}

impl ActiveGame {
    fn new(local: Symbol) -> Self {
        Self {
            board: Board::new(),
            local,
            remote: local.opponent(),
        }
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(self.local, self.remote, self.board.clone())
    }
}

/// One protocol session over a single connection
pub struct Session<T, O> {
    role: Role,
    config: SessionConfig,
    codec: SnapshotCodec,
    transport: T,
    operator: O,
    state: SessionState,
    game: Option<ActiveGame>,
}

impl<T: Transport, O: Operator> Session<T, O> {
    pub fn new(role: Role, transport: T, operator: O, config: SessionConfig) -> Self {
        Self {
            role,
            config,
            codec: SnapshotCodec::new(role),
            transport,
            operator,
            state: SessionState::Chat,
            game: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        if self.game.is_some() {
            Mode::Game
        } else {
            Mode::Chat
        }
    }

    /// Board of the game in progress
    pub fn board(&self) -> Option<&Board> {
        self.game.as_ref().map(|game| &game.board)
    }

    /// `(local, remote)` symbols of the game in progress
    pub fn symbols(&self) -> Option<(Symbol, Symbol)> {
        self.game.as_ref().map(|game| (game.local, game.remote))
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn operator(&self) -> &O {
        &self.operator
    }

    /// Hand the operator back, e.g. to serve the next connection
    pub fn into_operator(self) -> O {
        self.operator
    }

    /// Run the session to completion and close the transport
    pub async fn run(&mut self) -> Result<Termination> {
        info!(role = %self.role, "Session started");
        let outcome = self.drive().await;

        self.finish_state();
        if let Err(e) = self.transport.close().await {
            debug!("Error closing transport: {}", e);
        }

        match &outcome {
            Ok(reason) => info!(role = %self.role, ?reason, "Session finished"),
            Err(e) => error!(role = %self.role, "Session failed: {}", e),
        }
        outcome
    }

    async fn drive(&mut self) -> Result<Termination> {
        if self.role == Role::Initiator {
            if let Step::Finished(reason) = self.reply_chat().await? {
                return Ok(reason);
            }
        }

        loop {
            let inbound = self.receive().await?;
            if let Step::Finished(reason) = self.step(inbound).await? {
                return Ok(reason);
            }
        }
    }

    /// Handle one inbound message (`None` means the peer closed the stream)
    /// and send whatever reply it calls for.
    pub async fn step(&mut self, inbound: Option<Bytes>) -> Result<Step> {
        if self.state == SessionState::Terminated {
            return Err(CoreError::InvalidState("session already terminated".into()));
        }

        let Some(payload) = inbound else {
            info!("Peer closed the connection");
            self.operator.display("Received empty response from peer");
            return Ok(self.finish(Termination::PeerClosed));
        };

        match Inbound::classify(&payload) {
            Inbound::Quit => {
                info!("Peer quit");
                self.operator.display("Peer has decided to quit the program.");
                Ok(self.finish(Termination::PeerQuit))
            }
            _ if self.game.is_some() => self.on_snapshot(&payload).await,
            Inbound::Instructions => {
                info!("Peer accepted the game request, playing X");
                self.operator.display(instructions_text());
                self.game = Some(ActiveGame::new(Symbol::X));
                self.take_local_turn().await
            }
            Inbound::GameRequest => {
                info!("Peer requested a game, playing O");
                self.operator
                    .display("Initializing Tic-Tac-Toe from peer request");
                self.operator.display(instructions_text());
                self.game = Some(ActiveGame::new(Symbol::O));
                self.send(instructions_text().as_bytes()).await?;
                self.state = SessionState::AwaitingRemotePayload;
                Ok(Step::Continue)
            }
            Inbound::Chat(text) => {
                self.operator.display(&text);
                self.reply_chat().await
            }
        }
    }

    async fn on_snapshot(&mut self, payload: &[u8]) -> Result<Step> {
        let snapshot = match self.codec.decode(payload) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Discarding malformed snapshot: {}", e);
                self.operator.display(&format!(
                    "Received malformed game data while in game mode ({}), still waiting for the peer",
                    e
                ));
                return Ok(Step::Continue);
            }
        };

        if self.config.verify_peer {
            let game = self.active_game()?;
            if let Err(e) = verify_peer_snapshot(&game.board, game.local, game.remote, &snapshot) {
                warn!("Rejecting peer snapshot: {}", e);
                self.operator.display(&format!("Peer sent an invalid game state: {}", e));
                if let Err(send_err) = self.send(QUIT_SIGNAL.as_bytes()).await {
                    debug!("Failed to notify peer: {}", send_err);
                }
                self.finish_state();
                return Err(e);
            }
        }

        self.operator.display(&snapshot.board.render());
        let status = snapshot.status;
        let game = self.active_game_mut()?;
        game.board = snapshot.board;
        game.local = snapshot.local_symbol;
        game.remote = snapshot.remote_symbol;

        if status.is_over() {
            self.end_game(status);
            return self.reply_chat().await;
        }
        self.take_local_turn().await
    }

    async fn take_local_turn(&mut self) -> Result<Step> {
        self.state = SessionState::AwaitingLocalMove;

        loop {
            let Some(line) = self.operator.read_line(MOVE_PROMPT).await? else {
                return self.quit(Termination::OperatorClosed).await;
            };
            let line = line.trim();

            if line == QUIT_SIGNAL {
                self.operator.display("You have decided to quit the game.");
                return self.quit(Termination::LocalQuit).await;
            }

            let Ok(index) = line.parse::<usize>() else {
                self.operator
                    .display("Invalid move. Enter a square number from 0 to 8.");
                continue;
            };

            let game = self.active_game_mut()?;
            match game.board.apply_move(index, game.local) {
                Ok(()) => break,
                Err(e) => {
                    debug!("Rejected local move: {}", e);
                    self.operator
                        .display(&format!("Invalid move: {}. Please try again.", e));
                }
            }
        }

        let snapshot = self.active_game()?.snapshot();
        self.operator.display(&snapshot.board.render());
        let payload = self.codec.encode(&snapshot)?;
        self.send(&payload).await?;

        if snapshot.status.is_over() {
            // Peer answers with chat once it has seen the result
            self.end_game(snapshot.status);
        } else {
            self.state = SessionState::AwaitingRemotePayload;
        }
        Ok(Step::Continue)
    }

    async fn reply_chat(&mut self) -> Result<Step> {
        self.state = SessionState::Chat;

        let Some(line) = self.operator.read_line(CHAT_PROMPT).await? else {
            return self.quit(Termination::OperatorClosed).await;
        };

        if line == QUIT_SIGNAL {
            self.operator.display("You have decided to quit the program.");
            return self.quit(Termination::LocalQuit).await;
        }
        if line == game_start_trigger_text() {
            info!("Requesting a game of Tic-Tac-Toe");
        }

        self.send(line.as_bytes()).await?;
        Ok(Step::Continue)
    }

    fn end_game(&mut self, status: GameStatus) {
        let message = match status {
            GameStatus::LocalWon => "You won the game!",
            GameStatus::RemoteWon => "Peer won the game!",
            GameStatus::Draw => "The game is a draw!",
            GameStatus::Ongoing => return,
        };
        info!(?status, "Game over");
        self.operator.display(message);
        self.game = None;
        self.state = SessionState::Chat;
    }

    async fn quit(&mut self, reason: Termination) -> Result<Step> {
        self.send(QUIT_SIGNAL.as_bytes()).await?;
        Ok(self.finish(reason))
    }

    fn finish(&mut self, reason: Termination) -> Step {
        self.finish_state();
        Step::Finished(reason)
    }

    fn finish_state(&mut self) {
        self.state = SessionState::Terminated;
        self.game = None;
    }

    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.transport.send(payload).await
    }

    async fn receive(&mut self) -> Result<Option<Bytes>> {
        match self.config.receive_timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.receive())
                .await
                .map_err(|_| {
                    warn!("Peer silent for {:?}, giving up", limit);
                    CoreError::Timeout(limit.as_millis() as u64)
                })?,
            None => self.transport.receive().await,
        }
    }

    fn active_game(&self) -> Result<&ActiveGame> {
        self.game
            .as_ref()
            .ok_or_else(|| CoreError::InvalidState("no game in progress".into()))
    }

    fn active_game_mut(&mut self) -> Result<&mut ActiveGame> {
        self.game
            .as_mut()
            .ok_or_else(|| CoreError::InvalidState("no game in progress".into()))
    }
}
