use std::time::Duration;

use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tokio::time;

use crate::{
    models::{FlightResult, Tracker},
    AppState,
};

use super::{cadence, tracker_service, user_service};

/// Offer providers throttle aggressively; trackers are polled one at a
/// time with a fixed gap between requests.
const INTER_REQUEST_DELAY_MS: u64 = 1500;

/// Observations stored per tracker per run.
const MAX_RESULTS_PER_RUN: usize = 10;

#[derive(Debug, Default, Clone, Copy)]
pub struct ScrapeOutcome {
    pub processed: u64,
    pub failed: u64,
    pub alerts_sent: u64,
}

/// One scrape pass over all active trackers. A provider or store failure
/// for one tracker is logged and does not stop the run.
pub async fn run_scrape(state: &AppState) -> Result<ScrapeOutcome, String> {
    let trackers = tracker_service::list_active_trackers(state).await?;

    let mut out = ScrapeOutcome::default();

    for (i, tracker) in trackers.into_iter().enumerate() {
        if i > 0 {
            time::sleep(Duration::from_millis(INTER_REQUEST_DELAY_MS)).await;
        }

        match check_tracker(state, &tracker).await {
            Ok(alerted) => {
                out.processed += 1;
                if alerted {
                    out.alerts_sent += 1;
                }
            }
            Err(e) => {
                out.failed += 1;
                tracing::warn!(tracker = %tracker.id.to_hex(), "scrape failed: {e}");
            }
        }
    }

    tracing::info!(
        processed = out.processed,
        failed = out.failed,
        alerts = out.alerts_sent,
        "scrape run finished"
    );

    Ok(out)
}

/// Polls the provider for one tracker, stores the observations, fires the
/// price alert if a new offer crosses the threshold, and bumps
/// `last_checked_at`. Returns whether an alert email went out.
async fn check_tracker(state: &AppState, tracker: &Tracker) -> Result<bool, String> {
    let best_prior = tracker_service::best_price(state, tracker.id).await?;

    let response = state
        .flights
        .offers(
            &tracker.origin,
            &tracker.destination,
            &tracker.depart_date,
            tracker.return_date.as_deref(),
        )
        .await?;

    let now = Utc::now().timestamp();
    let mut alert_price: Option<f64> = None;

    for offer in response.offers.iter().take(MAX_RESULTS_PER_RUN) {
        if !offer.price.is_finite() || offer.price <= 0.0 {
            continue;
        }

        let result = FlightResult {
            id: ObjectId::new(),
            tracker_id: tracker.id,
            price: offer.price,
            currency: offer.currency.clone(),
            carrier: offer.carrier.clone(),
            observed_at: now,
        };

        tracker_service::insert_result(state, &result).await?;

        if cadence::price_alert_hit(&tracker.alert_kind, tracker.alert_value, best_prior, offer.price)
        {
            alert_price = Some(match alert_price {
                Some(p) => p.min(offer.price),
                None => offer.price,
            });
        }
    }

    tracker_service::touch_last_checked(state, tracker.id, now).await?;

    let Some(price) = alert_price else {
        return Ok(false);
    };

    let user = user_service::find_user(state, tracker.user_id)
        .await?
        .ok_or_else(|| "tracker owner not found".to_string())?;

    let subject = format!("Price alert: {}", tracker.route());
    let text = format!(
        "A fare on {} departing {} just hit {:.2}. Open {} to book.",
        tracker.route(),
        tracker.depart_date,
        price,
        state.settings.base_url
    );

    state.mail.send(&user.email, &subject, &text).await?;

    Ok(true)
}
