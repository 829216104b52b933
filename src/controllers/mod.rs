pub mod home_controller;
pub mod auth_controller;
pub mod user_controller;
pub mod tracker_controller;
pub mod compliance_controller;
pub mod cron_controller;
