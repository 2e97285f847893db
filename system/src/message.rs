use crate::types::{CanvasSnapshot, ConnectionId, CursorPosition, DrawOperation, SessionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything a client may send. Frames look like `{"event": "draw", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    JoinSession(SessionId),
    LeaveSession(SessionId),
    Draw(DrawOperation),
    Clear,
    RequestCanvas,
    CanvasData { to: ConnectionId, data: CanvasSnapshot },
    CursorMove { x: f64, y: f64 },
}

/// Everything the server pushes to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// First frame on every connection: the id the server knows it by.
    Connected(ConnectionId),
    Draw(DrawOperation),
    Clear,
    /// Asks the receiver to reply with `canvas-data` addressed to the carried id.
    SendCanvas(ConnectionId),
    CanvasData { data: CanvasSnapshot },
    CursorMove(CursorPosition),
    UserDisconnected(ConnectionId),
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        Self::from_frame(serde_json::from_str(text)?)
    }

    pub fn decode_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Self::from_frame(serde_json::from_slice(bytes)?)
    }

    /// A `draw` without `data` carries a null operation.
    fn from_frame(mut frame: Value) -> Result<Self, serde_json::Error> {
        if let Some(fields) = frame.as_object_mut() {
            if fields.get("event").and_then(Value::as_str) == Some("draw") {
                fields.entry("data").or_insert(Value::Null);
            }
        }
        serde_json::from_value(frame)
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            Self::JoinSession(_) => "join-session",
            Self::LeaveSession(_) => "leave-session",
            Self::Draw(_) => "draw",
            Self::Clear => "clear",
            Self::RequestCanvas => "request-canvas",
            Self::CanvasData { .. } => "canvas-data",
            Self::CursorMove { .. } => "cursor-move",
        }
    }
}

impl ServerMessage {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::Draw(_) => "draw",
            Self::Clear => "clear",
            Self::SendCanvas(_) => "send-canvas",
            Self::CanvasData { .. } => "canvas-data",
            Self::CursorMove(_) => "cursor-move",
            Self::UserDisconnected(_) => "user-disconnected",
        }
    }
}
