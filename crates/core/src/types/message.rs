//! Classification of raw payloads received outside a game

use crate::protocol::{game_start_trigger_text, instructions_text, QUIT_SIGNAL};

/// Meaning of a raw payload received while chatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Peer is leaving
    Quit,
    /// Peer accepted our game request; we move first
    Instructions,
    /// Peer asked for a game
    GameRequest,
    /// Ordinary chat text
    Chat(String),
}

impl Inbound {
    /// Classify a raw payload. Triggers must match byte for byte.
    pub fn classify(payload: &[u8]) -> Self {
        if payload == QUIT_SIGNAL.as_bytes() {
            Inbound::Quit
        } else if payload == instructions_text().as_bytes() {
            Inbound::Instructions
        } else if payload == game_start_trigger_text().as_bytes() {
            Inbound::GameRequest
        } else {
            Inbound::Chat(String::from_utf8_lossy(payload).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_triggers() {
        assert_eq!(Inbound::classify(b"/q"), Inbound::Quit);
        assert_eq!(Inbound::classify(b"play tictactoe"), Inbound::GameRequest);
        assert_eq!(
            Inbound::classify(instructions_text().as_bytes()),
            Inbound::Instructions
        );
    }

    #[test]
    fn test_near_miss_is_chat() {
        assert_eq!(
            Inbound::classify(b"play tictactoe "),
            Inbound::Chat("play tictactoe ".to_string())
        );
        assert_eq!(Inbound::classify(b"/quit"), Inbound::Chat("/quit".to_string()));
    }
}
