use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use system::{ClientMessage, ConnectionId};

use crate::admin::{describe_sessions, AdminCommand};
use crate::connection_tx_storage::{ConnectionTx, ConnectionTxStorage};
use crate::lifecycle::Lifecycle;

/// Unbounded so that connect, messages and disconnect of one connection are
/// never dropped or reordered on the way in.
pub type ServerTx = UnboundedSender<ServerCommand>;

#[derive(Debug)]
pub enum ServerCommand {
    Connection(ConnectionCommand),
    Admin(AdminCommand),
}

#[derive(Debug)]
pub enum ConnectionCommand {
    Connect {
        from: ConnectionId,
        tx: ConnectionTx,
    },
    /// `tx` is the egress this connection was opened with; a disconnect
    /// carrying any other channel is stale and ignored.
    Disconnect {
        from: ConnectionId,
        tx: ConnectionTx,
    },
    Message {
        from: ConnectionId,
        message: ClientMessage,
    },
}

/// Sole owner of shared state. Commands are handled one at a time.
struct Server {
    lifecycle: Lifecycle,
    connections: ConnectionTxStorage,
}

impl Server {
    fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new(),
            connections: ConnectionTxStorage::new(),
        }
    }

    fn handle_command(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Connection(command) => self.handle_connection_command(command),
            ServerCommand::Admin(command) => self.handle_admin_command(command),
        }
    }

    fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { from, tx } => match self.lifecycle.connect(from) {
                Ok(deliveries) => {
                    self.connections.insert(from, tx);
                    self.connections.send_all(deliveries);
                }
                Err(e) => log::warn!("Refusing connect: {}", e),
            },
            ConnectionCommand::Disconnect { from, tx } => {
                if !self.connections.is_current(&from, &tx) {
                    log::warn!("Ignoring stale disconnect of {}", from);
                    return;
                }
                let deliveries = self.lifecycle.disconnect(&from);
                self.connections.remove(&from);
                self.connections.send_all(deliveries);
            }
            ConnectionCommand::Message { from, message } => {
                let deliveries = self.lifecycle.handle_message(&from, message);
                self.connections.send_all(deliveries);
            }
        }
    }

    fn handle_admin_command(&mut self, command: AdminCommand) {
        match command {
            AdminCommand::ListSessions { tx } => {
                if tx.send(describe_sessions(self.lifecycle.state())).is_err() {
                    log::debug!("Admin requester went away");
                }
            }
        }
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = unbounded_channel::<ServerCommand>();

    tokio::spawn(async move {
        let mut server = Server::new();

        while let Some(command) = srv_rx.recv().await {
            server.handle_command(command);
        }
        log::info!("Server loop terminated");
    });

    srv_tx
}
