use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{ComplianceAnswers, ComplianceCheck, CurrentUser},
    services::compliance_service,
    AppState,
};

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "check not found" })),
    )
        .into_response()
}

fn db_error(e: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": format!("db error: {e}") })),
    )
        .into_response()
}

fn parse_oid(id: &str) -> Result<ObjectId, Response> {
    ObjectId::parse_str(id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "bad id" })),
        )
            .into_response()
    })
}

fn check_json(c: &ComplianceCheck) -> serde_json::Value {
    json!({
        "id": c.id.to_hex(),
        "system_name": c.system_name,
        "answers": c.answers,
        "risk_level": c.risk_level,
        "score": c.score,
        "created_at": c.created_at,
        "updated_at": c.updated_at,
    })
}

#[derive(Deserialize)]
pub struct CheckBody {
    #[serde(rename = "systemName")]
    pub system_name: String,

    #[serde(default)]
    pub answers: ComplianceAnswers,
}

pub async fn get_checks(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    match compliance_service::list_user_checks(&state, u.id).await {
        Ok(checks) => {
            let items: Vec<serde_json::Value> = checks.iter().map(check_json).collect();
            Json(json!({ "checks": items })).into_response()
        }
        Err(e) => db_error(e),
    }
}

pub async fn post_create_check(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<CheckBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let system_name = body.system_name.trim().to_string();
    if system_name.is_empty() {
        let mut errors = serde_json::Map::new();
        errors.insert("systemName".into(), json!("System name is required."));
        return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
    }

    match compliance_service::create_check(&state, u.id, &system_name, body.answers).await {
        Ok(c) => (StatusCode::CREATED, Json(json!({ "check": check_json(&c) }))).into_response(),
        Err(e) => db_error(e),
    }
}

pub async fn get_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let oid = match parse_oid(&id) {
        Ok(x) => x,
        Err(res) => return res,
    };

    match compliance_service::get_check(&state, u.id, oid).await {
        Ok(Some(c)) => Json(json!({ "check": check_json(&c) })).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error(e),
    }
}

pub async fn post_update_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<CheckBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let oid = match parse_oid(&id) {
        Ok(x) => x,
        Err(res) => return res,
    };

    let system_name = body.system_name.trim().to_string();
    if system_name.is_empty() {
        let mut errors = serde_json::Map::new();
        errors.insert("systemName".into(), json!("System name is required."));
        return (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response();
    }

    match compliance_service::reevaluate_check(&state, u.id, oid, &system_name, body.answers).await {
        Ok(Some(c)) => Json(json!({ "check": check_json(&c) })).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error(e),
    }
}

pub async fn post_delete_check(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let oid = match parse_oid(&id) {
        Ok(x) => x,
        Err(res) => return res,
    };

    match compliance_service::delete_check(&state, u.id, oid).await {
        Ok(true) => Json(json!({ "success": true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error(e),
    }
}
