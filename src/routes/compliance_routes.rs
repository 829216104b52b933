use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::compliance_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/checks",
            get(compliance_controller::get_checks).post(compliance_controller::post_create_check),
        )
        .route(
            "/checks/:id",
            get(compliance_controller::get_check).post(compliance_controller::post_update_check),
        )
        .route("/checks/:id/delete", post(compliance_controller::post_delete_check))
}
