use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::doc;
use serde_json::json;

use crate::AppState;

pub async fn home() -> impl IntoResponse {
    Json(json!({
        "name": "farewatch",
        "version": env!("CARGO_PKG_VERSION"),
        "products": ["flight price tracker", "EU AI Act compliance checker"],
    }))
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn health_db(State(state): State<AppState>) -> Response {
    match state.db.run_command(doc! { "ping": 1 }, None).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ok", "db": "up" }))).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "db": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "not found" })),
    )
        .into_response()
}
