use crate::server_state::ServerState;
use serde::Serialize;
use system::{ConnectionId, SessionId};
use tokio::sync::oneshot::Sender;

#[derive(Debug)]
pub enum AdminCommand {
    ListSessions {
        tx: Sender<Vec<SessionDescription>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDescription {
    pub session_id: SessionId,
    pub members: Vec<ConnectionId>,
    pub cursors: usize,
}

pub fn describe_sessions(state: &ServerState) -> Vec<SessionDescription> {
    let mut result: Vec<_> = state
        .sessions
        .iter()
        .map(|(session_id, session)| {
            let mut members: Vec<_> = session.members.iter().cloned().collect();
            members.sort();
            SessionDescription {
                session_id: session_id.clone(),
                members,
                cursors: state.presence.count(session_id),
            }
        })
        .collect();
    result.sort_by(|a, b| a.session_id.cmp(&b.session_id));
    result
}
