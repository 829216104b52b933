use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{CurrentUser, FlightResult, Report, Tracker},
    services::tracker_service::{self, NewTracker},
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
        Json(json!({ "error": "tracker not found" })),
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

fn field_errors(errors: &serde_json::Map<String, serde_json::Value>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "errors": errors })),
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

fn is_iata(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_iso_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn tracker_json(t: &Tracker) -> serde_json::Value {
    json!({
        "id": t.id.to_hex(),
        "origin": t.origin,
        "destination": t.destination,
        "depart_date": t.depart_date,
        "return_date": t.return_date,
        "status": t.status,
        "cadence": t.cadence,
        "alert_kind": t.alert_kind,
        "alert_value": t.alert_value,
        "last_checked_at": t.last_checked_at,
        "created_at": t.created_at,
    })
}

fn result_json(r: &FlightResult) -> serde_json::Value {
    json!({
        "id": r.id.to_hex(),
        "price": r.price,
        "currency": r.currency,
        "carrier": r.carrier,
        "observed_at": r.observed_at,
    })
}

fn report_json(r: &Report) -> serde_json::Value {
    json!({
        "id": r.id.to_hex(),
        "sent_at": r.sent_at,
        "summary": r.summary,
        "result_count": r.result_count,
    })
}

#[derive(Deserialize)]
pub struct TrackerBody {
    pub origin: String,
    pub destination: String,

    #[serde(rename = "departDate")]
    pub depart_date: String,

    #[serde(default, rename = "returnDate")]
    pub return_date: Option<String>,

    pub cadence: String,

    #[serde(default, rename = "alertKind")]
    pub alert_kind: Option<String>,

    #[serde(default, rename = "alertValue")]
    pub alert_value: Option<f64>,
}

/// Shared validation for create and update. Returns the normalized fields
/// or the per-field error map.
fn validate_body(body: &TrackerBody) -> Result<NewTracker, serde_json::Map<String, serde_json::Value>> {
    let mut errors = serde_json::Map::new();

    let origin = body.origin.trim().to_uppercase();
    let destination = body.destination.trim().to_uppercase();

    if !is_iata(&origin) {
        errors.insert("origin".into(), json!("Enter a 3-letter airport code."));
    }
    if !is_iata(&destination) {
        errors.insert("destination".into(), json!("Enter a 3-letter airport code."));
    }
    if origin == destination && is_iata(&origin) {
        errors.insert("destination".into(), json!("Destination must differ from origin."));
    }

    let depart_date = body.depart_date.trim().to_string();
    if !is_iso_date(&depart_date) {
        errors.insert("departDate".into(), json!("Enter a date as YYYY-MM-DD."));
    }

    let return_date = match &body.return_date {
        Some(rd) if !rd.trim().is_empty() => {
            let rd = rd.trim().to_string();
            if !is_iso_date(&rd) {
                errors.insert("returnDate".into(), json!("Enter a date as YYYY-MM-DD."));
            }
            Some(rd)
        }
        _ => None,
    };

    let cadence = body.cadence.trim().to_lowercase();
    if !matches!(cadence.as_str(), "daily" | "weekly" | "monthly") {
        errors.insert("cadence".into(), json!("Cadence must be daily, weekly or monthly."));
    }

    let alert_kind = body
        .alert_kind
        .as_deref()
        .unwrap_or("percent")
        .trim()
        .to_lowercase();
    if !matches!(alert_kind.as_str(), "percent" | "absolute") {
        errors.insert("alertKind".into(), json!("Alert kind must be percent or absolute."));
    }

    let alert_value = body.alert_value.unwrap_or(10.0);
    if !alert_value.is_finite() || alert_value <= 0.0 {
        errors.insert("alertValue".into(), json!("Enter a valid alert threshold."));
    } else if alert_kind == "percent" && alert_value >= 100.0 {
        errors.insert("alertValue".into(), json!("Percent threshold must be under 100."));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewTracker {
        origin,
        destination,
        depart_date,
        return_date,
        cadence,
        alert_kind,
        alert_value,
    })
}

// ---------------- CRUD ----------------

pub async fn get_trackers(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let trackers = match tracker_service::list_user_trackers(&state, u.id).await {
        Ok(v) => v,
        Err(e) => return db_error(e),
    };

    let items: Vec<serde_json::Value> = trackers.iter().map(tracker_json).collect();
    Json(json!({ "trackers": items })).into_response()
}

pub async fn post_create_tracker(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<TrackerBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let new = match validate_body(&body) {
        Ok(n) => n,
        Err(errors) => return field_errors(&errors),
    };

    match tracker_service::create_tracker(&state, u.id, new).await {
        Ok(t) => (StatusCode::CREATED, Json(json!({ "tracker": tracker_json(&t) }))).into_response(),
        Err(e) => db_error(e),
    }
}

pub async fn get_tracker(
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

    match tracker_service::get_tracker(&state, u.id, oid).await {
        Ok(Some(t)) => Json(json!({ "tracker": tracker_json(&t) })).into_response(),
        Ok(None) => not_found(),
        Err(e) => db_error(e),
    }
}

pub async fn post_update_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<TrackerBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let oid = match parse_oid(&id) {
        Ok(x) => x,
        Err(res) => return res,
    };

    let new = match validate_body(&body) {
        Ok(n) => n,
        Err(errors) => return field_errors(&errors),
    };

    match tracker_service::update_tracker(&state, u.id, oid, new).await {
        Ok(true) => Json(json!({ "success": true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error(e),
    }
}

pub async fn post_pause_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    set_status(state, id, user, "paused").await
}

pub async fn post_resume_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    set_status(state, id, user, "active").await
}

async fn set_status(
    state: AppState,
    id: String,
    user: Option<Extension<CurrentUser>>,
    status: &str,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let oid = match parse_oid(&id) {
        Ok(x) => x,
        Err(res) => return res,
    };

    match tracker_service::set_status(&state, u.id, oid, status).await {
        Ok(true) => Json(json!({ "success": true, "status": status })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error(e),
    }
}

pub async fn post_delete_tracker(
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

    match tracker_service::delete_tracker(&state, u.id, oid).await {
        Ok(true) => Json(json!({ "success": true })).into_response(),
        Ok(false) => not_found(),
        Err(e) => db_error(e),
    }
}

// ---------------- results & reports ----------------

#[derive(Deserialize)]
pub struct ResultsQuery {
    #[serde(default)]
    pub sort: Option<String>,
}

pub async fn get_tracker_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ResultsQuery>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let oid = match parse_oid(&id) {
        Ok(x) => x,
        Err(res) => return res,
    };

    // ownership check before exposing observations
    match tracker_service::get_tracker(&state, u.id, oid).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(),
        Err(e) => return db_error(e),
    }

    let by_price = query.sort.as_deref() != Some("time");

    match tracker_service::list_results(&state, oid, by_price).await {
        Ok(results) => {
            let items: Vec<serde_json::Value> = results.iter().map(result_json).collect();
            Json(json!({ "results": items })).into_response()
        }
        Err(e) => db_error(e),
    }
}

pub async fn get_tracker_reports(
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

    match tracker_service::get_tracker(&state, u.id, oid).await {
        Ok(Some(_)) => {}
        Ok(None) => return not_found(),
        Err(e) => return db_error(e),
    }

    match tracker_service::list_reports(&state, oid).await {
        Ok(reports) => {
            let items: Vec<serde_json::Value> = reports.iter().map(report_json).collect();
            Json(json!({ "reports": items })).into_response()
        }
        Err(e) => db_error(e),
    }
}
