use axum::{
    http::{header, Request, StatusCode},
    routing::{get, post},
    Router,
};
use http_body_util::BodyExt;
use mongodb::{bson::oid::ObjectId, Client};
use farewatch::{controllers::user_controller, config, services, AppState, RunGuards};
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

#[tokio::test]
async fn me_unauthorized_returns_401() {
    let state = test_state().await;
    let app = Router::new()
        .route("/me", get(user_controller::me))
        .with_state(state);

    let req = Request::builder()
        .method("GET")
        .uri("/me")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_current_user() {
    let state = test_state().await;
    let app = Router::new()
        .route("/me", get(user_controller::me))
        .with_state(state);

    let mut req = Request::builder()
        .method("GET")
        .uri("/me")
        .body(axum::body::Body::empty())
        .unwrap();

    req.extensions_mut().insert(CurrentUser {
        id: ObjectId::new(),
        email: "test@example.com".to_string(),
        username: "test".to_string(),
    });

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = response_body_string(res).await;
    assert!(body.contains("test@example.com"));
}

#[tokio::test]
async fn post_change_password_mismatch_returns_field_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/me/password", post(user_controller::post_change_password))
        .with_state(state);

    let mut req = Request::builder()
        .method("POST")
        .uri("/me/password")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            r#"{"password":"123456","rePassword":"654321"}"#,
        ))
        .unwrap();

    req.extensions_mut().insert(CurrentUser {
        id: ObjectId::new(),
        email: "test@example.com".to_string(),
        username: "test".to_string(),
    });

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Passwords do not match."));
}

#[tokio::test]
async fn post_change_email_invalid_returns_field_error() {
    let state = test_state().await;
    let app = Router::new()
        .route("/me/email", post(user_controller::post_change_email))
        .with_state(state);

    let mut req = Request::builder()
        .method("POST")
        .uri("/me/email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(r#"{"email":"nope"}"#))
        .unwrap();

    req.extensions_mut().insert(CurrentUser {
        id: ObjectId::new(),
        email: "test@example.com".to_string(),
        username: "test".to_string(),
    });

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = response_body_string(res).await;
    assert!(body.contains("Invalid email."));
}
