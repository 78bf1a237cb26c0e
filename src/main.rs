use actix_web::{web, App, HttpServer};
use log::{error, info};

use chess_match_app::config::ServerConfig;
use chess_match_app::models::AppState;
use chess_match_app::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_filter.as_str()));

    info!(
        "Starting chess match server at http://{}:{}",
        config.bind_addr, config.port
    );

    let app_state = web::Data::new(AppState::default());
    let static_dir = config.static_dir.clone();

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(|cfg| routes::configure_routes(cfg, &static_dir))
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
