pub mod flight_api;
pub mod mail;
pub mod db_init;

pub mod auth_service;
pub mod user_service;
pub mod tracker_service;
pub mod compliance_service;

pub mod cadence;
pub mod compliance;
pub mod scrape_runner;
pub mod report_runner;
