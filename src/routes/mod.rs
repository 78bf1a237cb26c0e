use std::path::{Path, PathBuf};

use actix_files as fs;
use actix_web::{web, HttpResponse, Result};
use log::info;

use crate::error::SetupError;
use crate::models::{AppState, SetupCreated, SetupRecord, SetupRequest};

/// Directory the board page and its assets are served from.
#[derive(Clone, Debug)]
pub struct StaticDir(pub PathBuf);

/// HTTP handler for the index page
pub async fn index(static_dir: web::Data<StaticDir>) -> Result<fs::NamedFile> {
    Ok(fs::NamedFile::open_async(static_dir.0.join("index.html")).await?)
}

/// Writes the setup handoff record for the match screen to claim.
pub async fn create_setup(
    request: web::Json<SetupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, SetupError> {
    let record = SetupRecord::from_request(&request)?;
    info!(
        "Setup: {} plays {}, {} plays {}",
        record.player_a.name, record.player_a.color, record.player_b.name, record.player_b.color
    );
    let setup_id = app_state.setups.put(record)?;
    let match_url = format!("/ws?setup={}", setup_id);
    Ok(HttpResponse::Created().json(SetupCreated {
        setup_id,
        match_url,
    }))
}

/// Abandons a setup that was never opened.
pub async fn discard_setup(
    setup_id: web::Path<String>,
    app_state: web::Data<AppState>,
) -> HttpResponse {
    if app_state.setups.discard(&setup_id) {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().finish()
    }
}

/// Setup API and the match websocket.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/setup").route(web::post().to(create_setup)))
        .service(web::resource("/api/setup/{setup_id}").route(web::delete().to(discard_setup)))
        .service(web::resource("/ws").route(web::get().to(crate::websocket::ws_index)));
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &Path) {
    configure_api(cfg);
    cfg.app_data(web::Data::new(StaticDir(static_dir.to_path_buf())))
        .service(web::resource("/").route(web::get().to(index)))
        .service(fs::Files::new("/static", static_dir));
}
