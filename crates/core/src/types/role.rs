//! Connection roles

use std::fmt;

/// Which end of the connection this side is.
///
/// Independent of the board symbol a side plays. On the wire the listener is
/// labelled "server" and the initiator "client".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Accepted the incoming connection
    Listener,
    /// Connected to a known address
    Initiator,
}

impl Role {
    /// Role of the other end
    pub fn peer(self) -> Self {
        match self {
            Role::Listener => Role::Initiator,
            Role::Initiator => Role::Listener,
        }
    }

    /// Capitalised label used in the wire status ("Server won")
    pub fn wire_label(self) -> &'static str {
        match self {
            Role::Listener => "Server",
            Role::Initiator => "Client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Listener => f.write_str("listener"),
            Role::Initiator => f.write_str("initiator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_is_involution() {
        assert_eq!(Role::Listener.peer(), Role::Initiator);
        assert_eq!(Role::Listener.peer().peer(), Role::Listener);
    }

    #[test]
    fn test_wire_labels() {
        assert_eq!(Role::Listener.wire_label(), "Server");
        assert_eq!(Role::Initiator.wire_label(), "Client");
    }
}
