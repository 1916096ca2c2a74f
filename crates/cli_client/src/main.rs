//! tictalk CLI client
//!
//! Initiator side of the protocol: connects to a listening host, sends the
//! first chat message and then alternates with the peer.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tictalk_core::{connect, ConsoleOperator, Operator, Role, Session, SessionConfig};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tictalk-client")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Connecting end of a tictalk session", long_about = None)]
struct Args {
    /// Host address to connect to
    #[arg(short, long, default_value = "127.0.0.1:2000")]
    connect: SocketAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Give up on a silent peer after this many seconds
    #[arg(long)]
    peer_timeout: Option<u64>,

    /// Adopt the peer's game snapshots without checking them
    #[arg(long, default_value_t = false)]
    trust_peer: bool,
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
    setup_logging(&args.log_level);

    println!("tictalk client v{}", env!("CARGO_PKG_VERSION"));
    println!("Connecting to {}...", args.connect);

    let transport = connect(args.connect)
        .await
        .with_context(|| format!("Failed to connect to {}", args.connect))?;

    let mut operator = ConsoleOperator::spawn();
    operator.display(&banner(args.connect));

    let mut session = Session::new(Role::Initiator, transport, operator, args.session_config());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, closing connection");
        }
        outcome = session.run() => {
            match outcome {
                Ok(reason) => info!("Session ended: {:?}", reason),
                Err(e) => {
                    error!("Session failed: {}", e);
                    println!("An error occurred: {}", e);
                }
            }
        }
    }

    println!("Connection closed.");
    Ok(())
}

fn banner(addr: SocketAddr) -> String {
    let connected_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    [
        format!("Connected to: {} on port: {} at {}", addr.ip(), addr.port(), connected_at),
        "Type /q to quit".to_string(),
        "Enter message to send. Please wait for input prompt before entering message...".to_string(),
        "Note: Type 'play tictactoe' to start a game of tictactoe".to_string(),
    ]
    .join("\n")
}

fn setup_logging(level: &str) {
    let log_level = level.parse::<Level>().unwrap_or(Level::WARN);

    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_connect_address() {
        let args = Args::parse_from(["tictalk-client"]);
        assert_eq!(args.connect.port(), tictalk_core::DEFAULT_PORT);
        assert!(args.session_config().verify_peer);
    }

    #[test]
    fn test_banner_mentions_commands() {
        let text = banner("127.0.0.1:2000".parse().unwrap());
        assert!(text.contains("Connected to: 127.0.0.1 on port: 2000"));
        assert!(text.contains("/q"));
        assert!(text.contains("play tictactoe"));
    }
}
