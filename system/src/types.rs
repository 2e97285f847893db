use serde::{Deserialize, Serialize};

/// Assigned by the server when a transport connection is accepted.
pub type ConnectionId = uuid::Uuid;
/// Chosen by clients. Two sessions are the same iff their ids are equal byte for byte.
pub type SessionId = String;

pub fn new_connection_id() -> ConnectionId {
    uuid::Uuid::new_v4()
}

/// One stroke or shape. Produced and consumed by clients only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawOperation(pub serde_json::Value);

/// Full surface state of one client, handed to a newcomer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasSnapshot(pub serde_json::Value);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "connectionId")]
    pub connection_id: ConnectionId,
}
