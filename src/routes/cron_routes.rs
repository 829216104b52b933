use axum::{Router, routing::post};
use crate::{AppState, controllers::cron_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/cron/scrape", post(cron_controller::post_cron_scrape))
        .route("/cron/reports", post(cron_controller::post_cron_reports))
}
