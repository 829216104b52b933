use axum::{
    http::{Request, StatusCode},
    routing::post,
    Router,
};
use http_body_util::BodyExt;
use mongodb::Client;
use farewatch::{controllers::cron_controller, config, services, AppState, RunGuards};
use tower::ServiceExt;

async fn test_state(cron_secret: &str) -> AppState {
    let mut settings = config::load();
    settings.flight_api_key = String::new();
    settings.mail_api_key = String::new();
    settings.cron_secret = cron_secret.to_string();

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
async fn cron_scrape_without_key_returns_401() {
    let state = test_state("super-secret").await;
    let app = Router::new()
        .route("/cron/scrape", post(cron_controller::post_cron_scrape))
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/cron/scrape")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body = response_body_string(res).await;
    assert!(body.contains("bad cron key"));
}

#[tokio::test]
async fn cron_reports_with_wrong_key_returns_401() {
    let state = test_state("super-secret").await;
    let app = Router::new()
        .route("/cron/reports", post(cron_controller::post_cron_reports))
        .with_state(state);

    let req = Request::builder()
        .method("POST")
        .uri("/cron/reports")
        .header("x-cron-key", "guess")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cron_surface_is_disabled_without_a_configured_secret() {
    let state = test_state("").await;
    let app = Router::new()
        .route("/cron/scrape", post(cron_controller::post_cron_scrape))
        .with_state(state);

    // even an empty header must not match an empty secret
    let req = Request::builder()
        .method("POST")
        .uri("/cron/scrape")
        .header("x-cron-key", "")
        .body(axum::body::Body::empty())
        .unwrap();

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
