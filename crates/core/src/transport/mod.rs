//! Transport adapter
//!
//! A byte-message abstraction over the connection: one `send` on one side is
//! one `receive` on the other. `receive` yields `None` once the peer has
//! closed the stream.

pub mod mock;
pub mod stream;
pub mod tcp;

pub use mock::MockTransport;
pub use stream::StreamTransport;
pub use tcp::{connect, Listener, TcpTransport};

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;

/// Message transport used by a session
#[async_trait]
pub trait Transport: Send {
    /// Send one protocol message
    async fn send(&mut self, payload: &[u8]) -> Result<()>;

    /// Wait for the next protocol message, `None` on peer close
    async fn receive(&mut self) -> Result<Option<Bytes>>;

    /// Close the connection
    async fn close(&mut self) -> Result<()>;
}
