use std::future::Future;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;

use crate::{
    models::{FlightResult, Report, Tracker},
    AppState,
};

use super::{cadence, tracker_service, user_service};

#[derive(Debug, Default, Clone, Copy)]
pub struct DispatchOutcome {
    pub processed: u64,
    pub sent: u64,
    pub failed: u64,
}

/// Sends one report per due candidate via `send`. A failed send is logged
/// and counted; the remaining candidates are still processed.
pub async fn dispatch_batch<F, Fut>(
    batch: Vec<(Tracker, Vec<FlightResult>)>,
    mut send: F,
) -> DispatchOutcome
where
    F: FnMut(Tracker, Vec<FlightResult>) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let mut out = DispatchOutcome::default();

    for (tracker, results) in batch {
        out.processed += 1;
        let tracker_id = tracker.id;

        match send(tracker, results).await {
            Ok(()) => out.sent += 1,
            Err(e) => {
                out.failed += 1;
                tracing::warn!(tracker = %tracker_id.to_hex(), "report send failed: {e}");
            }
        }
    }

    out
}

/// Scans active trackers and dispatches every due report. Trackers are
/// processed sequentially; candidates need at least one observation.
pub async fn run_report_dispatch(state: &AppState) -> Result<DispatchOutcome, String> {
    let now = Utc::now().timestamp();
    let trackers = tracker_service::list_active_trackers(state).await?;

    let mut batch: Vec<(Tracker, Vec<FlightResult>)> = Vec::new();

    for tracker in trackers {
        let results = match tracker_service::list_results(state, tracker.id, true).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(tracker = %tracker.id.to_hex(), "skipping, results query failed: {e}");
                continue;
            }
        };

        let last_report_at = match tracker_service::latest_report(state, tracker.id).await {
            Ok(r) => r.map(|r| r.sent_at),
            Err(e) => {
                tracing::warn!(tracker = %tracker.id.to_hex(), "skipping, report query failed: {e}");
                continue;
            }
        };

        if !cadence::is_report_due(&tracker.cadence, last_report_at, !results.is_empty(), now) {
            continue;
        }

        let picks = cadence::cheapest(&results, cadence::REPORT_RESULT_LIMIT);
        batch.push((tracker, picks));
    }

    let outcome = dispatch_batch(batch, |tracker, picks| {
        send_tracker_report(state, tracker, picks, now)
    })
    .await;

    tracing::info!(
        processed = outcome.processed,
        sent = outcome.sent,
        failed = outcome.failed,
        "report dispatch finished"
    );

    Ok(outcome)
}

pub fn report_summary(tracker: &Tracker, picks: &[FlightResult]) -> String {
    let mut lines = vec![format!(
        "Cheapest fares for {} departing {}:",
        tracker.route(),
        tracker.depart_date
    )];

    for r in picks {
        lines.push(format!("  {:.2} {} ({})", r.price, r.currency, r.carrier));
    }

    lines.join("\n")
}

async fn send_tracker_report(
    state: &AppState,
    tracker: Tracker,
    picks: Vec<FlightResult>,
    now: i64,
) -> Result<(), String> {
    let user = user_service::find_user(state, tracker.user_id)
        .await?
        .ok_or_else(|| "tracker owner not found".to_string())?;

    let summary = report_summary(&tracker, &picks);
    let subject = format!("Your {} fare report: {}", tracker.cadence, tracker.route());

    state.mail.send(&user.email, &subject, &summary).await?;

    let report = Report {
        id: ObjectId::new(),
        tracker_id: tracker.id,
        user_id: tracker.user_id,
        sent_at: now,
        summary,
        result_count: picks.len() as i64,
    };

    tracker_service::insert_report(state, &report).await
}
