use std::collections::HashSet;
use system::ConnectionId;

/// A room. Exists only while it has members; carries no drawing history.
pub struct Session {
    pub members: HashSet<ConnectionId>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            members: HashSet::new(),
        }
    }

    pub fn members_excluding(&self, connection_id: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .filter(|member| *member != connection_id)
            .cloned()
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
