use crate::relay::Delivery;
use std::collections::HashMap;
use system::{ConnectionId, ServerMessage};

/// Unbounded like the server queue: a joined peer never loses an event to a
/// full buffer, only to its own disconnect.
pub type ConnectionTx = tokio::sync::mpsc::UnboundedSender<ServerMessage>;

/// Egress channels of live connections.
pub struct ConnectionTxStorage {
    connection_txs: HashMap<ConnectionId, ConnectionTx>,
}

impl ConnectionTxStorage {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connection_txs.insert(connection_id, tx);
    }

    /// True if `tx` is the channel registered for `connection_id`.
    pub fn is_current(&self, connection_id: &ConnectionId, tx: &ConnectionTx) -> bool {
        self.connection_txs
            .get(connection_id)
            .map(|current| current.same_channel(tx))
            .unwrap_or(false)
    }

    /// Never waits. A closed channel means the peer is already going away.
    pub fn send(&self, delivery: Delivery) {
        let Delivery { to, message } = delivery;
        match self.connection_txs.get(&to) {
            Some(tx) => {
                if let Err(e) = tx.send(message) {
                    log::debug!(
                        "Connection {} already closed, dropping {}",
                        to,
                        e.0.event_name()
                    );
                }
            }
            None => log::debug!("No egress for {}, dropping {}", to, message.event_name()),
        }
    }

    pub fn send_all(&self, deliveries: Vec<Delivery>) {
        for delivery in deliveries {
            self.send(delivery);
        }
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(connection_id)
    }
}

impl Default for ConnectionTxStorage {
    fn default() -> Self {
        Self::new()
    }
}
