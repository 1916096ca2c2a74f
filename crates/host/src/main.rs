//! tictalk host
//!
//! Listener side of the protocol: binds a TCP port, accepts one peer at a
//! time and runs a chat/game session against the local console.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tictalk_core::{
    ConsoleOperator, Listener, Operator, Role, Session, SessionConfig, Termination,
};
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// tictalk host - waits for a peer to chat and play Tic-Tac-Toe
#[derive(Parser, Debug)]
#[command(name = "tictalk-host")]
#[command(author = "Tictalk Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Listening end of a tictalk session", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:2000")]
    bind: SocketAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Give up on a silent peer after this many seconds
    #[arg(long)]
    peer_timeout: Option<u64>,

    /// Adopt the peer's game snapshots without checking them
    #[arg(long, default_value = "false")]
    trust_peer: bool,

    /// Exit after the first connection instead of waiting for another
    #[arg(long, default_value = "false")]
    once: bool,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::default();
        if let Some(secs) = self.peer_timeout {
            config = config.with_receive_timeout(Duration::from_secs(secs));
        }
        if self.trust_peer {
            config = config.with_trusted_peer();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    setup_logging(&args.log_level)?;

    info!("Starting tictalk host v{}", env!("CARGO_PKG_VERSION"));

    let listener = Listener::bind(args.bind)
        .await
        .with_context(|| format!("Failed to listen on {}", args.bind))?;
    let local_addr = listener.local_addr()?;
    println!("Server is listening on: {}", local_addr);

    let config = args.session_config();

    // Wait for shutdown signal
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("Failed to setup SIGTERM handler")?;

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down...");
        }
        result = serve(&listener, config, args.once) => {
            result?;
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Accept peers one at a time until a session ends for a reason other than
/// the peer dropping the connection
async fn serve(listener: &Listener, config: SessionConfig, once: bool) -> Result<()> {
    let mut operator = ConsoleOperator::spawn();

    loop {
        let (transport, peer) = listener
            .accept()
            .await
            .context("Failed to accept connection")?;

        operator.display(&format!(
            "Connected by {}\nWait for a message from the peer and the input prompt before typing...\nType /q to quit",
            peer
        ));

        let mut session = Session::new(Role::Listener, transport, operator, config.clone());
        let outcome = session.run().await;
        operator = session.into_operator();

        match outcome {
            Ok(Termination::PeerClosed) if !once => {
                info!("Peer {} disconnected, waiting for the next connection", peer);
            }
            Ok(reason) => {
                info!("Session with {} ended: {:?}", peer, reason);
                return Ok(());
            }
            Err(e) => {
                error!("Session with {} failed: {}", peer, e);
                operator.display(&format!("An error occurred: {}", e));
                return Ok(());
            }
        }
    }
}

/// Setup logging with tracing
fn setup_logging(level: &str) -> Result<()> {
    let log_level = level.parse::<Level>().unwrap_or(Level::INFO);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["tictalk-host"]);
        assert_eq!(args.bind, "127.0.0.1:2000".parse::<SocketAddr>().unwrap());
        assert!(!args.once);

        let config = args.session_config();
        assert!(config.verify_peer);
        assert!(config.receive_timeout.is_none());
    }

    #[test]
    fn test_session_flags() {
        let args = Args::parse_from([
            "tictalk-host",
            "--bind",
            "0.0.0.0:4000",
            "--peer-timeout",
            "45",
            "--trust-peer",
            "--once",
        ]);
        assert_eq!(args.bind.port(), 4000);
        assert!(args.once);

        let config = args.session_config();
        assert!(!config.verify_peer);
        assert_eq!(config.receive_timeout, Some(Duration::from_secs(45)));
    }
}
