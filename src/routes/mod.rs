use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{controllers::home_controller, AppState};

pub mod home_routes;
pub mod auth_routes;
pub mod user_routes;
pub mod tracker_routes;
pub mod compliance_routes;
pub mod cron_routes;

pub fn app(state: AppState) -> Router {
    let router = Router::<AppState>::new();

    let router = home_routes::add_routes(router);
    let router = auth_routes::add_routes(router);
    let router = user_routes::add_routes(router);
    let router = tracker_routes::add_routes(router);
    let router = compliance_routes::add_routes(router);
    let router = cron_routes::add_routes(router);

    router
        .fallback(home_controller::not_found)
        .layer(from_fn_with_state(state.clone(), crate::auth::require_auth))
        .layer(from_fn_with_state(state.clone(), crate::auth::inject_current_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
