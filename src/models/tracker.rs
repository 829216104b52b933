use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,

    // IATA codes, stored uppercase
    pub origin: String,
    pub destination: String,

    // ISO dates (YYYY-MM-DD)
    pub depart_date: String,
    #[serde(default)]
    pub return_date: Option<String>,

    // "active" | "paused"
    pub status: String,

    // "daily" | "weekly" | "monthly"
    pub cadence: String,

    // "percent" | "absolute"
    pub alert_kind: String,
    pub alert_value: f64,

    #[serde(default)]
    pub last_checked_at: Option<i64>,

    pub created_at: i64,
}

impl Tracker {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn route(&self) -> String {
        format!("{} -> {}", self.origin, self.destination)
    }
}
