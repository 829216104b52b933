use chrono::Utc;
use futures_util::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::FindOptions;

use crate::{
    models::{FlightResult, Report, Tracker},
    AppState,
};

pub struct NewTracker {
    pub origin: String,
    pub destination: String,
    pub depart_date: String,
    pub return_date: Option<String>,
    pub cadence: String,
    pub alert_kind: String,
    pub alert_value: f64,
}

pub async fn list_user_trackers(state: &AppState, user_id: ObjectId) -> Result<Vec<Tracker>, String> {
    let trackers = state.db.collection::<Tracker>("trackers");

    let find_opts = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let mut cursor = trackers
        .find(doc! { "user_id": user_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut items: Vec<Tracker> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res.map_err(|e| e.to_string())?);
    }

    Ok(items)
}

/// Trackers eligible for the cron runs, oldest first so a tracker starved
/// by earlier failures is retried at the front of the next run.
pub async fn list_active_trackers(state: &AppState) -> Result<Vec<Tracker>, String> {
    let trackers = state.db.collection::<Tracker>("trackers");

    let find_opts = FindOptions::builder()
        .sort(doc! { "created_at": 1 })
        .build();

    let mut cursor = trackers
        .find(doc! { "status": "active" }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut items: Vec<Tracker> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res.map_err(|e| e.to_string())?);
    }

    Ok(items)
}

pub async fn create_tracker(
    state: &AppState,
    user_id: ObjectId,
    new: NewTracker,
) -> Result<Tracker, String> {
    let trackers = state.db.collection::<Tracker>("trackers");
    let now = Utc::now().timestamp();

    let tracker = Tracker {
        id: ObjectId::new(),
        user_id,
        origin: new.origin.to_uppercase(),
        destination: new.destination.to_uppercase(),
        depart_date: new.depart_date,
        return_date: new.return_date,
        status: "active".to_string(),
        cadence: new.cadence.to_lowercase(),
        alert_kind: new.alert_kind.to_lowercase(),
        alert_value: new.alert_value,
        last_checked_at: None,
        created_at: now,
    };

    trackers
        .insert_one(&tracker, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(tracker)
}

pub async fn get_tracker(
    state: &AppState,
    user_id: ObjectId,
    tracker_id: ObjectId,
) -> Result<Option<Tracker>, String> {
    let trackers = state.db.collection::<Tracker>("trackers");
    trackers
        .find_one(doc! { "_id": tracker_id, "user_id": user_id }, None)
        .await
        .map_err(|e| e.to_string())
}

pub async fn update_tracker(
    state: &AppState,
    user_id: ObjectId,
    tracker_id: ObjectId,
    new: NewTracker,
) -> Result<bool, String> {
    let trackers = state.db.collection::<Tracker>("trackers");

    let update = doc! {
        "$set": {
            "origin": new.origin.to_uppercase(),
            "destination": new.destination.to_uppercase(),
            "depart_date": new.depart_date,
            "return_date": new.return_date,
            "cadence": new.cadence.to_lowercase(),
            "alert_kind": new.alert_kind.to_lowercase(),
            "alert_value": new.alert_value,
        }
    };

    let res = trackers
        .update_one(doc! { "_id": tracker_id, "user_id": user_id }, update, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(res.matched_count > 0)
}

/// Returns true if the tracker existed and the status changed.
pub async fn set_status(
    state: &AppState,
    user_id: ObjectId,
    tracker_id: ObjectId,
    status: &str,
) -> Result<bool, String> {
    let trackers = state.db.collection::<Tracker>("trackers");

    let res = trackers
        .update_one(
            doc! { "_id": tracker_id, "user_id": user_id },
            doc! { "$set": { "status": status } },
            None,
        )
        .await
        .map_err(|e| e.to_string())?;

    Ok(res.matched_count > 0)
}

/// Deletes a tracker and everything hanging off it.
pub async fn delete_tracker(
    state: &AppState,
    user_id: ObjectId,
    tracker_id: ObjectId,
) -> Result<bool, String> {
    let trackers = state.db.collection::<Tracker>("trackers");

    let res = trackers
        .delete_one(doc! { "_id": tracker_id, "user_id": user_id }, None)
        .await
        .map_err(|e| e.to_string())?;

    if res.deleted_count == 0 {
        return Ok(false);
    }

    // cascade
    let results = state.db.collection::<FlightResult>("results");
    results
        .delete_many(doc! { "tracker_id": tracker_id }, None)
        .await
        .map_err(|e| e.to_string())?;

    let reports = state.db.collection::<Report>("reports");
    reports
        .delete_many(doc! { "tracker_id": tracker_id }, None)
        .await
        .map_err(|e| e.to_string())?;

    Ok(true)
}

pub async fn touch_last_checked(
    state: &AppState,
    tracker_id: ObjectId,
    now: i64,
) -> Result<(), String> {
    let trackers = state.db.collection::<Tracker>("trackers");
    trackers
        .update_one(
            doc! { "_id": tracker_id },
            doc! { "$set": { "last_checked_at": now } },
            None,
        )
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

// ---------------- results ----------------

pub async fn insert_result(state: &AppState, result: &FlightResult) -> Result<(), String> {
    let results = state.db.collection::<FlightResult>("results");
    results
        .insert_one(result, None)
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

pub async fn list_results(
    state: &AppState,
    tracker_id: ObjectId,
    sort_by_price: bool,
) -> Result<Vec<FlightResult>, String> {
    let results = state.db.collection::<FlightResult>("results");

    let sort = if sort_by_price {
        doc! { "price": 1, "observed_at": 1 }
    } else {
        doc! { "observed_at": -1 }
    };

    let find_opts = FindOptions::builder().sort(sort).build();

    let mut cursor = results
        .find(doc! { "tracker_id": tracker_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut items: Vec<FlightResult> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res.map_err(|e| e.to_string())?);
    }

    Ok(items)
}

/// Cheapest price seen so far for a tracker, if any.
pub async fn best_price(state: &AppState, tracker_id: ObjectId) -> Result<Option<f64>, String> {
    let results = state.db.collection::<FlightResult>("results");

    let find_opts = FindOptions::builder()
        .sort(doc! { "price": 1 })
        .limit(1)
        .build();

    let mut cursor = results
        .find(doc! { "tracker_id": tracker_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    match cursor.next().await {
        Some(res) => Ok(Some(res.map_err(|e| e.to_string())?.price)),
        None => Ok(None),
    }
}

// ---------------- reports ----------------

pub async fn insert_report(state: &AppState, report: &Report) -> Result<(), String> {
    let reports = state.db.collection::<Report>("reports");
    reports
        .insert_one(report, None)
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}

pub async fn list_reports(state: &AppState, tracker_id: ObjectId) -> Result<Vec<Report>, String> {
    let reports = state.db.collection::<Report>("reports");

    let find_opts = FindOptions::builder()
        .sort(doc! { "sent_at": -1 })
        .build();

    let mut cursor = reports
        .find(doc! { "tracker_id": tracker_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    let mut items: Vec<Report> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res.map_err(|e| e.to_string())?);
    }

    Ok(items)
}

pub async fn latest_report(state: &AppState, tracker_id: ObjectId) -> Result<Option<Report>, String> {
    let reports = state.db.collection::<Report>("reports");

    let find_opts = FindOptions::builder()
        .sort(doc! { "sent_at": -1 })
        .limit(1)
        .build();

    let mut cursor = reports
        .find(doc! { "tracker_id": tracker_id }, find_opts)
        .await
        .map_err(|e| e.to_string())?;

    match cursor.next().await {
        Some(res) => Ok(Some(res.map_err(|e| e.to_string())?)),
        None => Ok(None),
    }
}
