//! In-memory transport for driving sessions in tests

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;

use super::Transport;
use crate::{CoreError, Result};

/// Scripted transport.
///
/// Inbound messages are served in order. Once drained, `receive` reports peer
/// close, or never completes if the transport was built with [`MockTransport::stalled`].
#[derive(Debug, Default)]
pub struct MockTransport {
    inbound: VecDeque<Bytes>,
    sent: Vec<Bytes>,
    stall_when_drained: bool,
    fail_sends: bool,
    closed: bool,
}

impl MockTransport {
    /// Create a transport that will deliver `inbound` in order
    pub fn new<I, P>(inbound: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        Self {
            inbound: inbound
                .into_iter()
                .map(|p| Bytes::copy_from_slice(p.as_ref()))
                .collect(),
            ..Default::default()
        }
    }

    /// Peer that goes silent after the scripted messages
    pub fn stalled(mut self) -> Self {
        self.stall_when_drained = true;
        self
    }

    /// Every send fails with a broken pipe
    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn push_inbound(&mut self, payload: impl AsRef<[u8]>) {
        self.inbound.push_back(Bytes::copy_from_slice(payload.as_ref()));
    }

    /// Messages sent so far
    pub fn sent(&self) -> &[Bytes] {
        &self.sent
    }

    /// Sent messages decoded as UTF-8 (lossy)
    pub fn sent_text(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|b| String::from_utf8_lossy(b).into_owned())
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        if self.fail_sends || self.closed {
            return Err(CoreError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock transport closed",
            )));
        }
        self.sent.push(Bytes::copy_from_slice(payload));
        Ok(())
    }

    async fn receive(&mut self) -> Result<Option<Bytes>> {
        match self.inbound.pop_front() {
            Some(payload) => Ok(Some(payload)),
            None if self.stall_when_drained => std::future::pending().await,
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
