//! Wire protocol: frame codec, snapshot codec and trigger strings

mod codec;
mod snapshot;
mod triggers;

pub use codec::{FrameCodec, FRAME_HEADER_LEN, MAX_FRAME_SIZE};
pub use snapshot::SnapshotCodec;
pub use triggers::{game_start_trigger_text, instructions_text, QUIT_SIGNAL};
