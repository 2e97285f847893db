use crate::handoff;
use crate::relay::{self, Delivery};
use crate::server_state::{ServerError, ServerState};
use system::{ClientMessage, ConnectionId, ServerMessage};

/// Turns transport callbacks and decoded client messages into state changes
/// and the deliveries they cause. Every failure is logged and dropped.
pub struct Lifecycle {
    state: ServerState,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: ServerState::new(),
        }
    }

    pub fn state(&self) -> &ServerState {
        &self.state
    }

    /// Refuses an id that is still live; the caller must not wire its egress.
    pub fn connect(&mut self, connection_id: ConnectionId) -> Result<Vec<Delivery>, ServerError> {
        self.state.connect(connection_id)?;
        log::info!("Connection {} connected", connection_id);
        Ok(
            relay::send_to(&self.state, &connection_id, ServerMessage::Connected(connection_id))
                .into_iter()
                .collect(),
        )
    }

    /// Notifies what is left of the session. Explicit leave does not.
    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> Vec<Delivery> {
        let departure = self.state.disconnect(connection_id);
        log::info!("Connection {} disconnected", connection_id);
        match departure {
            Some(departure) => departure
                .remaining
                .into_iter()
                .map(|to| Delivery {
                    to,
                    message: ServerMessage::UserDisconnected(*connection_id),
                })
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn handle_message(&mut self, from: &ConnectionId, message: ClientMessage) -> Vec<Delivery> {
        match message {
            ClientMessage::JoinSession(session_id) => {
                match self.state.join_session(from, &session_id) {
                    Ok(previous) => {
                        if let Some(previous) = previous {
                            log::info!("Connection {} left session {}", from, previous);
                        }
                        log::info!("Connection {} joined session {}", from, session_id);
                    }
                    Err(e) => log::warn!("Ignoring join-session: {}", e),
                }
                Vec::new()
            }
            ClientMessage::LeaveSession(session_id) => {
                match self.state.leave_session(from, &session_id) {
                    Ok(()) => log::info!("Connection {} left session {}", from, session_id),
                    Err(e) => log::debug!("Ignoring leave-session: {}", e),
                }
                Vec::new()
            }
            ClientMessage::Draw(operation) => {
                relay::broadcast(&self.state, from, ServerMessage::Draw(operation))
            }
            ClientMessage::Clear => relay::broadcast(&self.state, from, ServerMessage::Clear),
            ClientMessage::RequestCanvas => handoff::request_canvas(&self.state, from),
            ClientMessage::CanvasData { to, data } => {
                handoff::forward_canvas(&self.state, from, &to, data)
                    .into_iter()
                    .collect()
            }
            ClientMessage::CursorMove { x, y } => match self.state.move_cursor(from, x, y) {
                Ok(position) => {
                    relay::broadcast(&self.state, from, ServerMessage::CursorMove(position))
                }
                Err(e) => {
                    log::debug!("Dropping cursor-move: {}", e);
                    Vec::new()
                }
            },
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}
