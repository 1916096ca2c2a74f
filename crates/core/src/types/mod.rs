//! Domain types shared by the session and the wire codec

mod message;
mod role;
mod snapshot;

pub use message::Inbound;
pub use role::Role;
pub use snapshot::{GameSnapshot, GameStatus};
