//! Library entrypoint for farewatch.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub mod config;
pub mod models;

// Keep this module at crate root because the codebase references it as
// `crate::auth`.
#[path = "middleware/auth.rs"]
pub mod auth;

pub mod services;

pub mod controllers;
pub mod routes;

/// One-at-a-time guard for an externally triggered batch job. A second
/// trigger while a run is in flight must not start a second run.
#[derive(Clone, Default)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn try_begin(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn end(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct RunGuards {
    pub scrape: RunFlag,
    pub reports: RunFlag,
}

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub flights: services::flight_api::FlightApiClient,
    pub mail: services::mail::MailClient,
    pub runs: RunGuards,
}
