//! Framed transport over any async byte stream
//!
//! Used with `TcpStream` in production and `tokio::io::DuplexStream` in tests.

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::Transport;
use crate::protocol::{FrameCodec, FRAME_HEADER_LEN};
use crate::{CoreError, Result};

/// Length-prefixed message transport over a byte stream
pub struct StreamTransport<S> {
    stream: S,
    closed: bool,
}

impl<S> StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            closed: false,
        }
    }
}

#[async_trait]
impl<S> Transport for StreamTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        let frame = FrameCodec::encode(payload)?;
        self.stream
            .write_all(&frame)
            .await
            .map_err(|e| CoreError::Transport(format!("Send failed: {}", e)))?;
        self.stream
            .flush()
            .await
            .map_err(|e| CoreError::Transport(format!("Flush failed: {}", e)))?;
        tracing::debug!("Sent {} byte message", payload.len());
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Bytes>> {
        let mut header = [0u8; FRAME_HEADER_LEN];
        match self.stream.read_exact(&mut header).await {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                tracing::debug!("Stream closed by peer");
                return Ok(None);
            }
            Err(e) => return Err(CoreError::Transport(format!("Receive failed: {}", e))),
        }

        let len = FrameCodec::payload_len(header)?;

        let mut payload = vec![0u8; len];
        self.stream
            .read_exact(&mut payload)
            .await
            .map_err(|_| CoreError::Transport("Stream closed while reading payload".into()))?;

        tracing::debug!("Received {} byte message", len);
        Ok(Some(Bytes::from(payload)))
    }

    async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.stream.shutdown().await {
            Ok(()) => Ok(()),
            // Peer already gone
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_message_boundaries_preserved() {
        let (a, b) = duplex(64);
        let mut left = StreamTransport::new(a);
        let mut right = StreamTransport::new(b);

        left.send(b"first").await.unwrap();
        left.send(b"second message").await.unwrap();

        assert_eq!(right.receive().await.unwrap().unwrap(), Bytes::from_static(b"first"));
        assert_eq!(
            right.receive().await.unwrap().unwrap(),
            Bytes::from_static(b"second message")
        );
    }

    #[tokio::test]
    async fn test_receive_none_after_peer_close() {
        let (a, b) = duplex(64);
        let mut left = StreamTransport::new(a);
        let mut right = StreamTransport::new(b);

        left.close().await.unwrap();
        drop(left);

        assert!(right.receive().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oversized_header_is_error() {
        let (mut raw, b) = duplex(64);
        let mut right = StreamTransport::new(b);

        raw.write_all(&u32::MAX.to_be_bytes()).await.unwrap();
        let result = right.receive().await;
        assert!(matches!(result, Err(CoreError::MessageTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_truncated_payload_is_error() {
        let (mut raw, b) = duplex(64);
        let mut right = StreamTransport::new(b);

        raw.write_all(&[0, 0, 0, 10, b'a', b'b']).await.unwrap();
        drop(raw);

        assert!(matches!(right.receive().await, Err(CoreError::Transport(_))));
    }
}
