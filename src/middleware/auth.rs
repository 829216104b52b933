use axum::{
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use mongodb::bson::{doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{models::{CurrentUser, User}, AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    // user id as hex string
    pub sub: String,
    // expiry (unix timestamp seconds)
    pub exp: usize,
}

fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    for part in raw.split(';') {
        let part = part.trim();
        let mut it = part.splitn(2, '=');
        let k = it.next()?.trim();
        let v = it.next()?.trim();
        if k == name {
            return Some(v.to_string());
        }
    }
    None
}

pub async fn inject_current_user(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let cookie_name = state.settings.jwt_cookie_name.as_str();

    if let Some(token) = get_cookie(req.headers(), cookie_name) {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(state.settings.jwt_secret.as_bytes()),
            &validation,
        );

        if let Ok(data) = decoded {
            if let Ok(user_id) = ObjectId::parse_str(&data.claims.sub) {
                let users = state.db.collection::<User>("users");

                if let Ok(Some(user)) = users.find_one(doc! { "_id": user_id }, None).await {
                    // Store user in request extensions so handlers can access it
                    req.extensions_mut().insert(CurrentUser::from(user));
                }
            }
        }
    }

    next.run(req).await
}

fn is_public_path(path: &str) -> bool {
    path == "/"
        || path == "/health"
        || path == "/health/db"
        || path == "/favicon.ico"
        || path.starts_with("/auth/")
        // cron routes carry their own key check instead of a session
        || path.starts_with("/cron/")
}

pub async fn require_auth(
    State(_state): State<AppState>,
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let path = req.uri().path();

    if is_public_path(path) {
        return next.run(req).await;
    }

    // If inject_current_user already put CurrentUser in extensions => authenticated
    if req.extensions().get::<CurrentUser>().is_some() {
        return next.run(req).await;
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
    )
        .into_response()
}
