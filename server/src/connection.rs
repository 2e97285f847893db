use actix::{Actor, ActorContext, AsyncContext, Handler, Message, Running, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;

use system::{new_connection_id, ClientMessage, ConnectionId, ServerMessage};

use crate::connection_tx_storage::ConnectionTx;
use crate::server::{ConnectionCommand, ServerCommand, ServerTx};

#[derive(Message)]
#[rtype(result = "()")]
struct ConnectionActorMessage(ServerMessage);

/// One websocket. Decodes frames into commands for the server task and
/// writes back whatever the server addresses to this connection.
struct ConnectionActor {
    connection_id: ConnectionId,
    srv_tx: ServerTx,
    /// Kept to identify this connection's disconnect to the server.
    egress: Option<ConnectionTx>,
}

impl ConnectionActor {
    fn submit(&self, command: ConnectionCommand) -> bool {
        self.srv_tx
            .send(ServerCommand::Connection(command))
            .is_ok()
    }

    fn ingress(&self, decoded: Result<ClientMessage, system::serde_json::Error>) {
        match decoded {
            Ok(message) => {
                log::debug!("Ingress {} from {}", message.event_name(), self.connection_id);
                if !self.submit(ConnectionCommand::Message {
                    from: self.connection_id,
                    message,
                }) {
                    log::warn!("Server is gone, dropping message from {}", self.connection_id);
                }
            }
            Err(e) => log::warn!("Malformed frame from {}: {}", self.connection_id, e),
        }
    }
}

impl Actor for ConnectionActor {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<ServerMessage>();
        self.egress = Some(tx.clone());

        if !self.submit(ConnectionCommand::Connect {
            from: self.connection_id,
            tx,
        }) {
            log::error!("Server is gone, refusing connection {}", self.connection_id);
            ctx.stop();
            return;
        }

        let addr = ctx.address().recipient();
        let connection_id = self.connection_id;

        tokio::spawn(async move {
            log::trace!("egress of {} - started", connection_id);
            while let Some(message) = rx.recv().await {
                addr.do_send(ConnectionActorMessage(message));
            }
            log::trace!("egress of {} - terminated", connection_id);
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        if let Some(tx) = self.egress.take() {
            self.submit(ConnectionCommand::Disconnect {
                from: self.connection_id,
                tx,
            });
        }
        Running::Stop
    }
}

/// Ingress
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for ConnectionActor {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => ctx.pong(&msg),
            Ok(ws::Message::Text(text)) => self.ingress(ClientMessage::decode(&text)),
            Ok(ws::Message::Binary(bin)) => self.ingress(ClientMessage::decode_bytes(&bin)),
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => (),
            Err(e) => {
                log::warn!("Protocol error on {}: {}", self.connection_id, e);
                ctx.stop();
            }
        }
    }
}

/// Egress
impl Handler<ConnectionActorMessage> for ConnectionActor {
    type Result = ();

    fn handle(
        &mut self,
        msg: ConnectionActorMessage,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Self::Result {
        let message = msg.0;
        log::debug!("Egress {} to {}", message.event_name(), self.connection_id);
        match message.encode() {
            Ok(text) => ctx.text(text),
            Err(e) => log::warn!("Cannot encode {}: {}", message.event_name(), e),
        }
    }
}

pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    srv_tx: web::Data<ServerTx>,
) -> Result<HttpResponse, Error> {
    ws::start(
        ConnectionActor {
            connection_id: new_connection_id(),
            srv_tx: srv_tx.get_ref().clone(),
            egress: None,
        },
        &req,
        stream,
    )
}
