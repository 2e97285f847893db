use std::collections::HashMap;
use system::{ConnectionId, SessionId};

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Unjoined,
    Joined(SessionId),
}

/// Live connections and the single session each one is in.
///
/// Unknown ids are ignored everywhere: transport callbacks may arrive after
/// the connection is already gone.
pub struct ConnectionRegistry {
    connection_states: HashMap<ConnectionId, ConnectionState>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connection_states: HashMap::new(),
        }
    }

    /// Starts tracking `connection_id` with no session. Registering an id
    /// that is already live resets it to `Unjoined`.
    pub fn register(&mut self, connection_id: ConnectionId) {
        self.connection_states
            .insert(connection_id, ConnectionState::Unjoined);
    }

    /// Returns the last state so the caller can tear down derived state.
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Option<ConnectionState> {
        self.connection_states.remove(connection_id)
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.connection_states.contains_key(connection_id)
    }

    pub fn current_session(&self, connection_id: &ConnectionId) -> Option<&SessionId> {
        match self.connection_states.get(connection_id) {
            Some(ConnectionState::Joined(session_id)) => Some(session_id),
            _ => None,
        }
    }

    /// No-op for unknown connections.
    pub fn set_state(&mut self, connection_id: &ConnectionId, state: ConnectionState) {
        if let Some(current) = self.connection_states.get_mut(connection_id) {
            *current = state;
        }
    }

    pub fn len(&self) -> usize {
        self.connection_states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connection_states.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
