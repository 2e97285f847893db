use crate::connection_registry::{ConnectionRegistry, ConnectionState};
use crate::presence::PresenceTracker;
use crate::session_directory::SessionDirectory;
use system::{ConnectionId, CursorPosition, SessionId};
use thiserror::Error;

/// Registry, directory and presence, mutated together so that membership and
/// cursors never disagree. Owned by exactly one task (see `server.rs`).
pub struct ServerState {
    pub connections: ConnectionRegistry,
    pub sessions: SessionDirectory,
    pub presence: PresenceTracker,
}

#[derive(Debug, Error, PartialEq)]
pub enum ServerError {
    #[error("connection {0} is not registered")]
    UnknownConnection(ConnectionId),
    #[error("connection {0} is already registered")]
    AlreadyConnected(ConnectionId),
    #[error("connection {0} is not in any session")]
    NotJoined(ConnectionId),
    #[error("connection {0} is not a member of session {1}")]
    NotMember(ConnectionId, SessionId),
}

/// What a disconnect left behind, for the departure notice.
#[derive(Debug)]
pub struct Departure {
    pub session_id: SessionId,
    pub remaining: Vec<ConnectionId>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            connections: ConnectionRegistry::new(),
            sessions: SessionDirectory::new(),
            presence: PresenceTracker::new(),
        }
    }

    /// A live id is never registered twice; the existing connection keeps it.
    pub fn connect(&mut self, connection_id: ConnectionId) -> Result<(), ServerError> {
        if self.connections.contains(&connection_id) {
            return Err(ServerError::AlreadyConnected(connection_id));
        }
        self.connections.register(connection_id);
        Ok(())
    }

    pub fn is_connected(&self, connection_id: &ConnectionId) -> bool {
        self.connections.contains(connection_id)
    }

    /// Joins `session_id`, leaving the current session first if it differs.
    /// Returns the session that was implicitly left, if any.
    pub fn join_session(
        &mut self,
        connection_id: &ConnectionId,
        session_id: &SessionId,
    ) -> Result<Option<SessionId>, ServerError> {
        if !self.connections.contains(connection_id) {
            return Err(ServerError::UnknownConnection(*connection_id));
        }

        let previous = self.connections.current_session(connection_id).cloned();
        if previous.as_ref() == Some(session_id) {
            return Ok(None);
        }
        if let Some(ref previous) = previous {
            self.remove_membership(connection_id, previous);
        }

        self.sessions.join(*connection_id, session_id);
        self.connections
            .set_state(connection_id, ConnectionState::Joined(session_id.clone()));
        Ok(previous)
    }

    pub fn leave_session(
        &mut self,
        connection_id: &ConnectionId,
        session_id: &SessionId,
    ) -> Result<(), ServerError> {
        match self.connections.current_session(connection_id) {
            Some(current) if current == session_id => {}
            _ => {
                return Err(ServerError::NotMember(
                    *connection_id,
                    session_id.clone(),
                ))
            }
        }
        self.remove_membership(connection_id, session_id);
        self.connections
            .set_state(connection_id, ConnectionState::Unjoined);
        Ok(())
    }

    /// Forgets the connection entirely. Safe to call more than once.
    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> Option<Departure> {
        match self.connections.unregister(connection_id) {
            Some(ConnectionState::Joined(session_id)) => {
                self.remove_membership(connection_id, &session_id);
                let remaining = self
                    .sessions
                    .get(&session_id)
                    .map(|s| s.members.iter().cloned().collect())
                    .unwrap_or_default();
                Some(Departure {
                    session_id,
                    remaining,
                })
            }
            _ => None,
        }
    }

    /// Everyone who should see an event from `connection_id`.
    pub fn peers_of(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<(&SessionId, Vec<ConnectionId>), ServerError> {
        if !self.connections.contains(connection_id) {
            return Err(ServerError::UnknownConnection(*connection_id));
        }
        let session_id = self
            .connections
            .current_session(connection_id)
            .ok_or(ServerError::NotJoined(*connection_id))?;
        Ok((
            session_id,
            self.sessions.members_excluding(session_id, connection_id),
        ))
    }

    pub fn move_cursor(
        &mut self,
        connection_id: &ConnectionId,
        x: f64,
        y: f64,
    ) -> Result<CursorPosition, ServerError> {
        let session_id = self
            .connections
            .current_session(connection_id)
            .cloned()
            .ok_or(ServerError::NotJoined(*connection_id))?;
        Ok(self
            .presence
            .move_cursor(&session_id, *connection_id, x, y))
    }

    fn remove_membership(&mut self, connection_id: &ConnectionId, session_id: &SessionId) {
        self.sessions.leave(connection_id, session_id);
        self.presence.clear(session_id, connection_id);
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
