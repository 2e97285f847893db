use std::collections::HashMap;
use system::{ConnectionId, CursorPosition, SessionId};

/// Last known pointer of each member, per session.
pub struct PresenceTracker {
    cursors: HashMap<SessionId, HashMap<ConnectionId, CursorPosition>>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self {
            cursors: HashMap::new(),
        }
    }

    pub fn move_cursor(
        &mut self,
        session_id: &SessionId,
        connection_id: ConnectionId,
        x: f64,
        y: f64,
    ) -> CursorPosition {
        let position = CursorPosition {
            x,
            y,
            connection_id,
        };
        self.cursors
            .entry(session_id.clone())
            .or_insert_with(HashMap::new)
            .insert(connection_id, position);
        position
    }

    pub fn clear(&mut self, session_id: &SessionId, connection_id: &ConnectionId) {
        let emptied = match self.cursors.get_mut(session_id) {
            Some(cursors) => {
                cursors.remove(connection_id);
                cursors.is_empty()
            }
            None => false,
        };
        if emptied {
            self.cursors.remove(session_id);
        }
    }

    pub fn get(&self, session_id: &SessionId, connection_id: &ConnectionId) -> Option<&CursorPosition> {
        self.cursors
            .get(session_id)
            .and_then(|cursors| cursors.get(connection_id))
    }

    pub fn count(&self, session_id: &SessionId) -> usize {
        self.cursors.get(session_id).map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use system::new_connection_id;

    #[test]
    fn it_keeps_only_the_latest_position() {
        let mut presence = PresenceTracker::new();
        let a = new_connection_id();
        let room: SessionId = "room1".into();
        presence.move_cursor(&room, a, 1.0, 1.0);
        let latest = presence.move_cursor(&room, a, 5.0, 6.0);

        assert_eq!(latest.connection_id, a);
        assert_eq!(presence.get(&room, &a), Some(&latest));
        assert_eq!(presence.count(&room), 1);
    }

    #[test]
    fn it_drops_session_entry_after_last_clear() {
        let mut presence = PresenceTracker::new();
        let a = new_connection_id();
        let room: SessionId = "room1".into();
        presence.move_cursor(&room, a, 1.0, 1.0);
        presence.clear(&room, &a);
        presence.clear(&room, &a);
        assert!(presence.is_empty());
    }
}
