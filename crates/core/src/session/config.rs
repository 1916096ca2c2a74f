//! Session configuration

use std::time::Duration;

/// Tunables for one protocol session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Longest wait for the peer's next message (None = wait forever)
    pub receive_timeout: Option<Duration>,

    /// Check every peer snapshot against the local game before adopting it
    pub verify_peer: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            receive_timeout: None,
            verify_peer: true,
        }
    }
}

impl SessionConfig {
    /// Give up on a silent peer after `timeout`
    pub fn with_receive_timeout(mut self, timeout: Duration) -> Self {
        self.receive_timeout = Some(timeout);
        self
    }

    /// Adopt peer snapshots verbatim
    pub fn with_trusted_peer(mut self) -> Self {
        self.verify_peer = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert!(config.receive_timeout.is_none());
        assert!(config.verify_peer);
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::default()
            .with_receive_timeout(Duration::from_secs(30))
            .with_trusted_peer();
        assert_eq!(config.receive_timeout, Some(Duration::from_secs(30)));
        assert!(!config.verify_peer);
    }
}
