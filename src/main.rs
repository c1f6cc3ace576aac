use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use mathwords_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize application state: {e}"));

    log::info!("starting HTTP server on {host}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::generate_problem)
            .service(handlers::submit_answer)
            .service(handlers::get_hint)
            .service(handlers::get_solution)
            .service(handlers::get_score)
            .service(handlers::health_check)
    })
    .bind((host, port))?
    .run()
    .await
}
