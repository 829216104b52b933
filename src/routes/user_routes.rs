use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::user_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/me", get(user_controller::me))
        .route("/me/email", post(user_controller::post_change_email))
        .route("/me/password", post(user_controller::post_change_password))
}
