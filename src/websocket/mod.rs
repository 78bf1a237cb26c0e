pub mod handler;
pub mod session_handlers;

use actix_web::{http::header, web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{info, warn};
use serde::Deserialize;
use uuid::Uuid;

use crate::models::AppState;

pub use handler::MatchSession;
pub use session_handlers::SETUP_PAGE;

#[derive(Deserialize, Debug)]
pub struct MatchQuery {
    pub setup: Option<String>,
}

fn back_to_setup() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, SETUP_PAGE))
        .finish()
}

/// Opens the match screen for a stored setup. Without a usable record the
/// page is sent back to setup instead.
///
/// The record is only taken once the upgrade handshake has succeeded, so a
/// plain GET on the match url leaves it in place.
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<MatchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let setup_id = query.setup.clone().unwrap_or_default();
    let mut response = match ws::handshake(&req) {
        Ok(response) => response,
        Err(e) => {
            warn!("Not a websocket upgrade for setup {}: {}", setup_id, e);
            return Ok(back_to_setup());
        }
    };
    let record = match app_state.setups.take(&setup_id) {
        Ok(record) => record,
        Err(e) => {
            warn!("Cannot open match: {}", e);
            return Ok(back_to_setup());
        }
    };

    let id = Uuid::new_v4().to_string();
    info!("New match session {} from setup {}", id, setup_id);
    Ok(response.streaming(ws::WebsocketContext::create(
        MatchSession::new(id, record),
        stream,
    )))
}
