use crate::session::Session;
use std::collections::HashMap;
use system::{ConnectionId, SessionId};

/// Session id → member set. Membership exclusivity across sessions is
/// enforced one level up by `ServerState`, which also owns the registry.
pub struct SessionDirectory {
    sessions: HashMap<SessionId, Session>,
}

impl SessionDirectory {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Creates the session on first join. Returns false if already a member.
    pub fn join(&mut self, connection_id: ConnectionId, session_id: &SessionId) -> bool {
        self.sessions
            .entry(session_id.clone())
            .or_insert_with(Session::new)
            .members
            .insert(connection_id)
    }

    /// Drops the session once its last member is gone. Returns false if the
    /// connection was not a member.
    pub fn leave(&mut self, connection_id: &ConnectionId, session_id: &SessionId) -> bool {
        let removed = match self.sessions.get_mut(session_id) {
            Some(session) => session.members.remove(connection_id),
            None => return false,
        };
        if self
            .sessions
            .get(session_id)
            .map(|s| s.members.is_empty())
            .unwrap_or(false)
        {
            self.sessions.remove(session_id);
            log::debug!("Session {} is empty, dropped", session_id);
        }
        removed
    }

    pub fn is_member(&self, connection_id: &ConnectionId, session_id: &SessionId) -> bool {
        self.sessions
            .get(session_id)
            .map(|s| s.members.contains(connection_id))
            .unwrap_or(false)
    }

    /// Other members of the session. Empty when the session does not exist
    /// or `connection_id` is not in it.
    pub fn members_excluding(
        &self,
        session_id: &SessionId,
        connection_id: &ConnectionId,
    ) -> Vec<ConnectionId> {
        match self.sessions.get(session_id) {
            Some(session) if session.members.contains(connection_id) => {
                session.members_excluding(connection_id)
            }
            _ => Vec::new(),
        }
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SessionId, &Session)> {
        self.sessions.iter()
    }

    pub fn has_session(&self, session_id: &SessionId) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use system::new_connection_id;

    #[test]
    fn it_creates_session_on_first_join() {
        let mut directory = SessionDirectory::new();
        let a = new_connection_id();
        let room: SessionId = "room1".into();
        assert!(!directory.has_session(&room));
        assert!(directory.join(a, &room));
        assert!(directory.has_session(&room));
        assert!(!directory.join(a, &room), "second join is idempotent");
        assert_eq!(directory.get(&room).map(|s| s.members.len()), Some(1));
    }

    #[test]
    fn it_removes_session_when_last_member_leaves() {
        let mut directory = SessionDirectory::new();
        let a = new_connection_id();
        let b = new_connection_id();
        let room: SessionId = "room1".into();
        directory.join(a, &room);
        directory.join(b, &room);

        assert!(directory.leave(&a, &room));
        assert!(directory.has_session(&room));
        assert!(directory.leave(&b, &room));
        assert!(directory.is_empty());
    }

    #[test]
    fn it_ignores_leave_for_foreign_or_missing_session() {
        let mut directory = SessionDirectory::new();
        let a = new_connection_id();
        let b = new_connection_id();
        directory.join(a, &"room1".to_string());
        assert!(!directory.leave(&b, &"room1".to_string()));
        assert!(!directory.leave(&a, &"nowhere".to_string()));
        assert!(directory.is_member(&a, &"room1".to_string()));
    }

    #[test]
    fn it_excludes_the_asking_connection() {
        let mut directory = SessionDirectory::new();
        let a = new_connection_id();
        let b = new_connection_id();
        let c = new_connection_id();
        let room: SessionId = "room1".into();
        for id in [a, b, c] {
            directory.join(id, &room);
        }

        let mut others = directory.members_excluding(&room, &a);
        others.sort();
        let mut expected = vec![b, c];
        expected.sort();
        assert_eq!(others, expected);
    }

    #[test]
    fn it_returns_nobody_for_outsiders_and_unknown_sessions() {
        let mut directory = SessionDirectory::new();
        let a = new_connection_id();
        let outsider = new_connection_id();
        directory.join(a, &"room1".to_string());
        assert!(directory
            .members_excluding(&"room1".to_string(), &outsider)
            .is_empty());
        assert!(directory
            .members_excluding(&"never".to_string(), &a)
            .is_empty());
    }
}
