use crate::admin::AdminCommand;
use crate::server::{ServerCommand, ServerTx};
use actix_web::{error, web, HttpResponse, Result};
use tokio::sync::oneshot;

pub fn configure_admin_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin").service(
            web::resource("/sessions")
                .name("admin_sessions")
                .route(web::get().to(list_sessions)),
        ),
    );
}

pub async fn list_sessions(srv_tx: web::Data<ServerTx>) -> Result<HttpResponse> {
    let (tx, rx) = oneshot::channel();
    srv_tx
        .send(ServerCommand::Admin(AdminCommand::ListSessions { tx }))
        .map_err(|_| error::ErrorServiceUnavailable("server is not running"))?;
    let sessions = rx
        .await
        .map_err(|_| error::ErrorServiceUnavailable("server is not running"))?;
    Ok(HttpResponse::Ok().json(sessions))
}
