//! Length-prefixed framing for protocol messages
//!
//! Every message on the stream is `[4 bytes length (big endian)][payload]`,
//! so one send always arrives as one receive regardless of how TCP splits it.

use crate::error::{CoreError, Result};

/// Maximum payload size (64KB)
pub const MAX_FRAME_SIZE: usize = 64 * 1024;

/// Size of the length prefix
pub const FRAME_HEADER_LEN: usize = 4;

/// Frame codec for protocol payloads
pub struct FrameCodec;

impl FrameCodec {
    /// Wrap a payload in a length-prefixed frame
    pub fn encode(payload: &[u8]) -> Result<Vec<u8>> {
        if payload.len() > MAX_FRAME_SIZE {
            return Err(CoreError::MessageTooLarge {
                size: payload.len(),
                max: MAX_FRAME_SIZE,
            });
        }

        let len = payload.len() as u32;
        let mut buf = Vec::with_capacity(FRAME_HEADER_LEN + payload.len());
        buf.extend_from_slice(&len.to_be_bytes());
        buf.extend_from_slice(payload);

        Ok(buf)
    }

    /// Read and validate the payload length from a frame header
    pub fn payload_len(header: [u8; FRAME_HEADER_LEN]) -> Result<usize> {
        let len = u32::from_be_bytes(header) as usize;
        if len > MAX_FRAME_SIZE {
            return Err(CoreError::MessageTooLarge {
                size: len,
                max: MAX_FRAME_SIZE,
            });
        }
        Ok(len)
    }

    /// Extract the payload of one complete frame
    pub fn decode(buf: &[u8]) -> Result<&[u8]> {
        if buf.len() < FRAME_HEADER_LEN {
            return Err(CoreError::Transport(
                "Buffer too small for length prefix".into(),
            ));
        }

        let len = Self::payload_len([buf[0], buf[1], buf[2], buf[3]])?;

        if buf.len() < FRAME_HEADER_LEN + len {
            return Err(CoreError::Transport("Buffer too small for payload".into()));
        }

        Ok(&buf[FRAME_HEADER_LEN..FRAME_HEADER_LEN + len])
    }
}
