use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::{services::auth_service, AppState};

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

// ---------------- LOGIN ----------------

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Response {
    let email = body.email.trim().to_string();
    let password = body.password.trim().to_string();

    let mut errors = serde_json::Map::new();

    if email.is_empty() {
        errors.insert("email".into(), json!("Email is required."));
    } else if !is_valid_email(&email) {
        errors.insert("email".into(), json!("Invalid email."));
    }

    if password.is_empty() {
        errors.insert("password".into(), json!("Password is required."));
    }

    if !errors.is_empty() {
        return field_errors(&errors);
    }

    let user = match auth_service::login_user(&state, &email, &password).await {
        Ok(u) => u,
        Err(errs) => {
            for (k, v) in errs {
                errors.insert(k, json!(v));
            }
            return field_errors(&errors);
        }
    };

    let token = match auth_service::make_jwt_with_days(&state, &user.id, 7) {
        Ok(t) => t,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Auth error: {e}") })),
            )
                .into_response();
        }
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token));

    (
        jar,
        Json(json!({
            "user": {
                "id": user.id.to_hex(),
                "email": user.email,
                "username": user.username,
            }
        })),
    )
        .into_response()
}

// ---------------- REGISTER ----------------

#[derive(Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub email: String,
    pub password: String,

    #[serde(default, rename = "rePassword")]
    pub re_password: Option<String>,
}

pub async fn post_register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterBody>,
) -> Response {
    let username = body.username.trim().to_string();
    let email = body.email.trim().to_string();
    let password = body.password.trim().to_string();
    let re_password = body.re_password.as_deref().unwrap_or("").trim().to_string();

    let mut errors = serde_json::Map::new();

    if username.is_empty() {
        errors.insert("username".into(), json!("Username is required."));
    } else if username.len() < 3 {
        errors.insert("username".into(), json!("Username must be at least 3 characters."));
    }

    if email.is_empty() {
        errors.insert("email".into(), json!("Email is required."));
    } else if !is_valid_email(&email) {
        errors.insert("email".into(), json!("Invalid email."));
    }

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

    let user_id = match auth_service::register_user(&state, &username, &email, &password).await {
        Ok(id) => id,
        Err(errs) => {
            for (k, v) in errs {
                errors.insert(k, json!(v));
            }
            return field_errors(&errors);
        }
    };

    let token = match auth_service::make_jwt_with_days(&state, &user_id, 7) {
        Ok(t) => t,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Auth error: {e}") })),
            )
                .into_response();
        }
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token));

    (
        jar,
        (
            StatusCode::CREATED,
            Json(json!({
                "user": {
                    "id": user_id.to_hex(),
                    "email": email,
                    "username": username,
                }
            })),
        ),
    )
        .into_response()
}

// ---------------- LOGOUT ----------------

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = jar.add(auth_service::clear_auth_cookie(&state));
    (jar, Json(json!({ "success": true }))).into_response()
}
