use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::CurrentUser,
    services::user_service,
    AppState,
};

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
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

fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}

pub async fn me(user: Option<Extension<CurrentUser>>) -> Response {
    match user {
        Some(Extension(u)) => (
            StatusCode::OK,
            Json(json!({
                "id": u.id.to_hex(),
                "email": u.email,
                "username": u.username,
            })),
        )
            .into_response(),
        None => unauthorized(),
    }
}

#[derive(Deserialize)]
pub struct ChangeEmailBody {
    pub email: String,
}

pub async fn post_change_email(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<ChangeEmailBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let email = body.email.trim().to_string();

    let mut errors = serde_json::Map::new();
    if email.is_empty() {
        errors.insert("email".into(), json!("Email is required."));
    } else if !is_valid_email(&email) {
        errors.insert("email".into(), json!("Invalid email."));
    }

    if !errors.is_empty() {
        return field_errors(&errors);
    }

    if let Err(errs) = user_service::change_email(&state, u.id, &email).await {
        for (k, v) in errs {
            errors.insert(k, json!(v));
        }
        return field_errors(&errors);
    }

    Json(json!({ "success": true, "email": email })).into_response()
}

#[derive(Deserialize)]
pub struct ChangePasswordBody {
    pub password: String,

    #[serde(default, rename = "rePassword")]
    pub re_password: Option<String>,
}

pub async fn post_change_password(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<ChangePasswordBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let password = body.password.trim().to_string();
    let re_password = body.re_password.as_deref().unwrap_or("").trim().to_string();

    let mut errors = serde_json::Map::new();

    if password.is_empty() {
        errors.insert("password".into(), json!("Password is required."));
    } else if password.len() < 6 {
        errors.insert("password".into(), json!("Password must be at least 6 characters."));
    }

    if !password.is_empty() && password != re_password {
        errors.insert("rePassword".into(), json!("Passwords do not match."));
    }

    if !errors.is_empty() {
        return field_errors(&errors);
    }

    if let Err(errs) = user_service::change_password(&state, u.id, &password).await {
        for (k, v) in errs {
            errors.insert(k, json!(v));
        }
        return field_errors(&errors);
    }

    Json(json!({ "success": true })).into_response()
}
