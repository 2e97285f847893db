//! Canvas handoff for late joiners.
//!
//! A newcomer sends `request-canvas`; every other member of its session gets
//! `send-canvas` carrying the newcomer's id, and any of them may answer with
//! `canvas-data` addressed to it. Replies are forwarded as they come, without
//! deduplication or deadline. A lone member gets no reply and starts blank.

use crate::relay::{self, Delivery};
use crate::server_state::ServerState;
use system::{CanvasSnapshot, ConnectionId, ServerMessage};

pub fn request_canvas(state: &ServerState, requester: &ConnectionId) -> Vec<Delivery> {
    relay::broadcast(state, requester, ServerMessage::SendCanvas(*requester))
}

/// The addressee field is stripped; the requester only sees the snapshot.
pub fn forward_canvas(
    state: &ServerState,
    from: &ConnectionId,
    to: &ConnectionId,
    data: CanvasSnapshot,
) -> Option<Delivery> {
    log::debug!("canvas-data from {} to {}", from, to);
    relay::send_to(state, to, ServerMessage::CanvasData { data })
}
