use crate::connection::ws_index;
use crate::handlers::admin::configure_admin_handlers;
use actix_web::{web, HttpResponse, Responder};

mod admin;

pub fn root(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/ws/").route(web::get().to(ws_index)));
    cfg.service(web::resource("/health").route(web::get().to(health)));

    configure_admin_handlers(cfg);
}

async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}
