use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::json;

use chess_match_app::models::{AppState, SetupCreated, Side};
use chess_match_app::routes::configure_api;

#[actix_rt::test]
async fn setup_is_stored_once_for_the_match_screen() {
    let state = web::Data::new(AppState::default());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_api)).await;

    let req = test::TestRequest::post()
        .uri("/api/setup")
        .set_json(json!({ "player_a": "Ann", "player_b": "Bob", "minutes": 10 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: SetupCreated = test::read_body_json(resp).await;
    assert_eq!(created.match_url, format!("/ws?setup={}", created.setup_id));
    assert_eq!(state.setups.len(), 1);

    let record = state.setups.take(&created.setup_id).unwrap();
    assert_eq!(record.player_a.time_left, 600);
    assert_eq!(record.current_turn, Side::White);
    assert_ne!(record.player_a.color, record.player_b.color);
    assert!(state.setups.is_empty());
}

#[actix_rt::test]
async fn invalid_setup_is_a_bad_request() {
    let state = web::Data::new(AppState::default());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_api)).await;

    for body in [
        json!({ "player_a": "", "player_b": "Bob", "minutes": 5 }),
        json!({ "player_a": "Ann", "player_b": "Bob", "minutes": 15 }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/setup")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
    assert!(state.setups.is_empty());
}

#[actix_rt::test]
async fn missing_setup_redirects_to_setup_page() {
    let state = web::Data::new(AppState::default());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_api)).await;

    for uri in ["/ws?setup=does-not-exist", "/ws"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    }
}

#[actix_rt::test]
async fn unclaimed_setup_can_be_discarded() {
    let state = web::Data::new(AppState::default());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_api)).await;

    let req = test::TestRequest::post()
        .uri("/api/setup")
        .set_json(json!({ "player_a": "Ann", "player_b": "Bob", "minutes": 5 }))
        .to_request();
    let created: SetupCreated = test::call_and_read_body_json(&app, req).await;

    let uri = format!("/api/setup/{}", created.setup_id);
    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(state.setups.is_empty());
}

#[actix_rt::test]
async fn plain_get_on_match_url_keeps_the_setup() {
    let state = web::Data::new(AppState::default());
    let app = test::init_service(App::new().app_data(state.clone()).configure(configure_api)).await;

    let req = test::TestRequest::post()
        .uri("/api/setup")
        .set_json(json!({ "player_a": "Ann", "player_b": "Bob", "minutes": 5 }))
        .to_request();
    let created: SetupCreated = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get().uri(&created.match_url).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    assert_eq!(state.setups.len(), 1);
    assert!(state.setups.take(&created.setup_id).is_ok());
}
