//! Console operator backed by stdin/stdout

use async_trait::async_trait;
use std::io::{BufRead, Write};
use tokio::sync::mpsc;

use super::Operator;
use crate::Result;

/// Line-buffered console.
///
/// Stdin is read on a plain OS thread and forwarded over a channel, so an
/// outstanding read never holds the runtime open at shutdown.
pub struct ConsoleOperator {
    lines: mpsc::Receiver<String>,
}

impl ConsoleOperator {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<String>(32);

        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line.trim_end_matches('\r').to_string()).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
            tracing::debug!("Stdin closed");
        });

        Self { lines: rx }
    }
}

#[async_trait]
impl Operator for ConsoleOperator {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{} ", prompt)?;
        stdout.flush()?;
        Ok(self.lines.recv().await)
    }

    fn display(&mut self, text: &str) {
        println!("{}", text);
    }
}
