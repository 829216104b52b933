use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::tracker_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            "/trackers",
            get(tracker_controller::get_trackers).post(tracker_controller::post_create_tracker),
        )
        .route(
            "/trackers/:id",
            get(tracker_controller::get_tracker).post(tracker_controller::post_update_tracker),
        )
        .route("/trackers/:id/pause", post(tracker_controller::post_pause_tracker))
        .route("/trackers/:id/resume", post(tracker_controller::post_resume_tracker))
        .route("/trackers/:id/delete", post(tracker_controller::post_delete_tracker))
        .route("/trackers/:id/results", get(tracker_controller::get_tracker_results))
        .route("/trackers/:id/reports", get(tracker_controller::get_tracker_reports))
}
