use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use server::config::ServerConfig;
use server::handlers;
use server::server::spawn_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = ServerConfig::from_env();
    let srv_tx = web::Data::new(spawn_server());

    log::info!("Listening on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST"])
                    .allow_any_header(),
            )
            .app_data(srv_tx.clone())
            .configure(handlers::root)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
