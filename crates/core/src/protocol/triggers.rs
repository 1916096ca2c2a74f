//! Reserved payloads that switch session modes

/// Payload that ends the session
pub const QUIT_SIGNAL: &str = "/q";

const GAME_START_TRIGGER: &str = "play tictactoe";

const INSTRUCTIONS: &str = "\
Game has started! Make a move by entering the index of the square you want to mark.

The squares are numbered as follows:
 0 | 1 | 2
---------
 3 | 4 | 5
---------
 6 | 7 | 8
For example, type '4' to mark the center square.
";

/// Game instructions, doubling as the sentinel that starts a game.
///
/// Both ends compare against this constant byte for byte.
pub fn instructions_text() -> &'static str {
    INSTRUCTIONS
}

/// Chat command that asks the peer for a game
pub fn game_start_trigger_text() -> &'static str {
    GAME_START_TRIGGER
}
