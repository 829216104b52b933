use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single price observation for a tracker. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightResult {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub tracker_id: ObjectId,

    pub price: f64,
    pub currency: String,
    pub carrier: String,

    pub observed_at: i64,
}
