use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::{
    services::{report_runner, scrape_runner},
    AppState,
};

fn cron_key_ok(state: &AppState, headers: &HeaderMap) -> bool {
    let secret = state.settings.cron_secret.as_str();
    if secret.is_empty() {
        // no secret configured => cron surface is disabled
        return false;
    }

    headers
        .get("x-cron-key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == secret)
        .unwrap_or(false)
}

fn bad_key() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "error": "bad cron key" })),
    )
        .into_response()
}

fn already_running() -> Response {
    (
        StatusCode::CONFLICT,
        Json(json!({ "success": false, "error": "run already in progress" })),
    )
        .into_response()
}

/// POST /cron/scrape — poll the offer provider for every active tracker.
pub async fn post_cron_scrape(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !cron_key_ok(&state, &headers) {
        return bad_key();
    }

    if !state.runs.scrape.try_begin() {
        return already_running();
    }

    let res = scrape_runner::run_scrape(&state).await;
    state.runs.scrape.end();

    match res {
        Ok(out) => Json(json!({ "success": true, "processed": out.processed })).into_response(),
        Err(e) => {
            tracing::error!("scrape run failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e })),
            )
                .into_response()
        }
    }
}

/// POST /cron/reports — send every due cadence report.
pub async fn post_cron_reports(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !cron_key_ok(&state, &headers) {
        return bad_key();
    }

    if !state.runs.reports.try_begin() {
        return already_running();
    }

    let res = report_runner::run_report_dispatch(&state).await;
    state.runs.reports.end();

    match res {
        Ok(out) => Json(json!({ "success": true, "sent": out.sent })).into_response(),
        Err(e) => {
            tracing::error!("report dispatch failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": e })),
            )
                .into_response()
        }
    }
}
