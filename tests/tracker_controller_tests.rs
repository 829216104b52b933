use axum::{
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use mongodb::{bson::oid::ObjectId, Client};
use farewatch::{controllers::tracker_controller, config, services, AppState, RunGuards};
use farewatch::models::CurrentUser;
use tower::ServiceExt;

async fn test_state() -> AppState {
    let mut settings = config::load();
    settings.flight_api_key = String::new();
    settings.mail_api_key = String::new();

    let client = Client::with_uri_str(&settings.mongodb_uri)
        .await
        .expect("mongodb client");
    let db = client.database(&settings.mongodb_db);

    AppState {
        db,
        flights: services::flight_api::FlightApiClient::new(
            settings.flight_api_url.clone(),
            settings.flight_api_key.clone(),
        ),
        mail: services::mail::MailClient::new(
            settings.mail_api_url.clone(),
            settings.mail_api_key.clone(),
            settings.mail_from.clone(),
        ),
        runs: RunGuards::default(),
        settings,
    }
}

async fn response_body_string(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

fn test_user() -> CurrentUser {
    CurrentUser {
        id: ObjectId::new(),
        email: "test@example.com".to_string(),
        username: "test".to_string(),
    }
}

#[tokio::test]
async fn post_create_tracker_unauthorized_returns_401() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers", post(tracker_controller::post_create_tracker))
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/trackers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"origin":"AMS","destination":"LIS","departDate":"2026-10-01","cadence":"weekly"}"#,
        ))
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = response_body_string(res).await;
    assert!(body.to_lowercase().contains("unauthorized"));
}

#[tokio::test]
async fn post_create_tracker_bad_airport_code_returns_field_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers", post(tracker_controller::post_create_tracker))
        .with_state(state);

    let mut req = Request::builder()
        .method("POST")
        .uri("/trackers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"origin":"Amsterdam","destination":"LIS","departDate":"2026-10-01","cadence":"weekly"}"#,
        ))
        .unwrap();

    // Add authenticated user (so we hit the validation branch, not unauthorized).
    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("3-letter airport code"));
}

#[tokio::test]
async fn post_create_tracker_bad_cadence_returns_field_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers", post(tracker_controller::post_create_tracker))
        .with_state(state);

    let mut req = Request::builder()
        .method("POST")
        .uri("/trackers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"origin":"AMS","destination":"LIS","departDate":"2026-10-01","cadence":"hourly"}"#,
        ))
        .unwrap();

    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Cadence must be daily, weekly or monthly."));
}

#[tokio::test]
async fn post_create_tracker_bad_date_returns_field_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers", post(tracker_controller::post_create_tracker))
        .with_state(state);

    let mut req = Request::builder()
        .method("POST")
        .uri("/trackers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"origin":"AMS","destination":"LIS","departDate":"01-10-2026","cadence":"weekly"}"#,
        ))
        .unwrap();

    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn post_create_tracker_same_route_returns_field_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers", post(tracker_controller::post_create_tracker))
        .with_state(state);

    let mut req = Request::builder()
        .method("POST")
        .uri("/trackers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"origin":"AMS","destination":"ams","departDate":"2026-10-01","cadence":"daily"}"#,
        ))
        .unwrap();

    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Destination must differ from origin."));
}

#[tokio::test]
async fn post_create_tracker_bad_percent_threshold_returns_field_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers", post(tracker_controller::post_create_tracker))
        .with_state(state);

    let mut req = Request::builder()
        .method("POST")
        .uri("/trackers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"origin":"AMS","destination":"LIS","departDate":"2026-10-01","cadence":"weekly","alertKind":"percent","alertValue":150}"#,
        ))
        .unwrap();

    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Percent threshold must be under 100."));
}

#[tokio::test]
async fn get_tracker_bad_id_returns_400() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers/:id", get(tracker_controller::get_tracker))
        .with_state(state);

    let mut req = Request::builder()
        .method("GET")
        .uri("/trackers/not-a-hex-id")
        .body(axum::body::Body::empty())
        .unwrap();

    req.extensions_mut().insert(test_user());

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("bad id"));
}

#[tokio::test]
async fn get_trackers_unauthorized_returns_401() {
    let state = test_state().await;
    let app = Router::new()
        .route("/trackers", get(tracker_controller::get_trackers))
        .with_state(state);

    let req = Request::builder()
        .method("GET")
        .uri("/trackers")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
