use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Record of a summary email sent for a tracker. Append-only; the newest
/// `sent_at` per tracker gates the next cadence window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub tracker_id: ObjectId,
    pub user_id: ObjectId,

    pub sent_at: i64,
    pub summary: String,
    pub result_count: i64,
}
