//! TCP connect/accept for the two session roles

use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};

use super::StreamTransport;
use crate::{CoreError, Result};

/// Framed transport over TCP
pub type TcpTransport = StreamTransport<TcpStream>;

/// Connect to a listening peer
pub async fn connect(addr: SocketAddr) -> Result<TcpTransport> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| CoreError::Connection(format!("Failed to connect to {}: {}", addr, e)))?;
    // Messages are small and strictly alternate
    stream.set_nodelay(true)?;
    tracing::info!("Connected to {}", addr);
    Ok(StreamTransport::new(stream))
}

/// Bound listening socket, accepting one peer at a time
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind the listen address
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let inner = TcpListener::bind(addr)
            .await
            .map_err(|e| CoreError::Connection(format!("Failed to bind {}: {}", addr, e)))?;
        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.inner.local_addr()?)
    }

    /// Wait for the next peer
    pub async fn accept(&self) -> Result<(TcpTransport, SocketAddr)> {
        let (stream, peer) = self
            .inner
            .accept()
            .await
            .map_err(|e| CoreError::Connection(format!("Failed to accept connection: {}", e)))?;
        stream.set_nodelay(true)?;
        tracing::info!("Accepted connection from {}", peer);
        Ok((StreamTransport::new(stream), peer))
    }
}
