pub mod user;
pub mod tracker;
pub mod flight_result;
pub mod report;
pub mod compliance_check;

pub use user::{CurrentUser, User};
pub use tracker::Tracker;
pub use flight_result::FlightResult;
pub use report::Report;
pub use compliance_check::{ComplianceAnswers, ComplianceCheck};
