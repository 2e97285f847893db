//! Fan-out. Decides who receives an event; sending is the caller's job.

use crate::server_state::ServerState;
use system::{ConnectionId, ServerMessage};

/// One message for one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub to: ConnectionId,
    pub message: ServerMessage,
}

/// Every other member of the sender's session. Nothing if the sender is not
/// in a session.
pub fn broadcast(state: &ServerState, from: &ConnectionId, message: ServerMessage) -> Vec<Delivery> {
    match state.peers_of(from) {
        Ok((session_id, targets)) => {
            log::debug!(
                "{} in {} by {} -> {} peer(s)",
                message.event_name(),
                session_id,
                from,
                targets.len()
            );
            targets
                .into_iter()
                .map(|to| Delivery {
                    to,
                    message: message.clone(),
                })
                .collect()
        }
        Err(e) => {
            log::debug!("Dropping {}: {}", message.event_name(), e);
            Vec::new()
        }
    }
}

/// Point to point, ignoring session membership. Nothing if `to` is gone.
pub fn send_to(state: &ServerState, to: &ConnectionId, message: ServerMessage) -> Option<Delivery> {
    if state.is_connected(to) {
        Some(Delivery { to: *to, message })
    } else {
        log::debug!("Dropping {} for stale connection {}", message.event_name(), to);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use system::serde_json::json;
    use system::{new_connection_id, DrawOperation};

    fn draw() -> ServerMessage {
        ServerMessage::Draw(DrawOperation(json!({"id": 1})))
    }

    #[test]
    fn it_never_delivers_to_the_sender() {
        let mut state = ServerState::new();
        let room = "room1".to_string();
        let ids: Vec<_> = (0..5).map(|_| new_connection_id()).collect();
        for id in &ids {
            state.connect(*id).expect("");
            state.join_session(id, &room).expect("");
        }

        for sender in &ids {
            let deliveries = broadcast(&state, sender, draw());
            assert_eq!(deliveries.len(), ids.len() - 1);
            assert!(deliveries.iter().all(|d| d.to != *sender));
        }
    }

    #[test]
    fn it_delivers_nothing_to_a_lone_member() {
        let mut state = ServerState::new();
        let a = new_connection_id();
        state.connect(a).expect("");
        state.join_session(&a, &"room1".to_string()).expect("");
        assert!(broadcast(&state, &a, draw()).is_empty());
    }

    #[test]
    fn it_discards_events_from_unjoined_connections() {
        let mut state = ServerState::new();
        let a = new_connection_id();
        let b = new_connection_id();
        state.connect(a).expect("");
        state.connect(b).expect("");
        state.join_session(&b, &"room1".to_string()).expect("");

        assert!(broadcast(&state, &a, draw()).is_empty());
        assert!(broadcast(&state, &new_connection_id(), draw()).is_empty());
    }

    #[test]
    fn it_keeps_sessions_apart() {
        let mut state = ServerState::new();
        let a = new_connection_id();
        let b = new_connection_id();
        let c = new_connection_id();
        for id in [a, b, c] {
            state.connect(id).expect("");
        }
        state.join_session(&a, &"room1".to_string()).expect("");
        state.join_session(&b, &"room1".to_string()).expect("");
        state.join_session(&c, &"room2".to_string()).expect("");

        let deliveries = broadcast(&state, &a, draw());
        assert_eq!(
            deliveries,
            vec![Delivery {
                to: b,
                message: draw()
            }]
        );
    }

    #[test]
    fn it_sends_point_to_point_only_to_live_connections() {
        let mut state = ServerState::new();
        let a = new_connection_id();
        state.connect(a).expect("");
        assert!(send_to(&state, &a, ServerMessage::Clear).is_some());
        state.disconnect(&a);
        assert!(send_to(&state, &a, ServerMessage::Clear).is_none());
    }
}
