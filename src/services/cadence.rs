use crate::models::FlightResult;

/// Max observations included in a summary report.
pub const REPORT_RESULT_LIMIT: usize = 5;

const SECS_PER_DAY: f64 = 86_400.0;

/// Maps a cadence string to its period in days. Unknown cadences get no
/// period and are never due, same as an unrecognized alert condition never
/// firing.
pub fn cadence_period_days(cadence: &str) -> Option<f64> {
    match cadence {
        "daily" => Some(1.0),
        "weekly" => Some(7.0),
        "monthly" => Some(30.0),
        _ => None,
    }
}

/// Report-due decision for one tracker.
///
/// A tracker with no observations is never due. A tracker that has never
/// been reported on is due as soon as it has an observation. Otherwise the
/// elapsed time is compared as a float day count against the cadence
/// period; the exact boundary counts as due.
pub fn is_report_due(
    cadence: &str,
    last_report_at: Option<i64>,
    has_results: bool,
    now: i64,
) -> bool {
    if !has_results {
        return false;
    }

    let last = match last_report_at {
        Some(ts) => ts,
        None => return true,
    };

    let period = match cadence_period_days(cadence) {
        Some(d) => d,
        None => return false,
    };

    let elapsed_days = (now - last) as f64 / SECS_PER_DAY;
    elapsed_days >= period
}

/// Up to `limit` cheapest observations, price ascending; the earlier
/// observation wins a price tie.
pub fn cheapest(results: &[FlightResult], limit: usize) -> Vec<FlightResult> {
    let mut sorted: Vec<FlightResult> = results.to_vec();
    sorted.sort_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then(a.observed_at.cmp(&b.observed_at))
    });
    sorted.truncate(limit);
    sorted
}

/// Price-alert decision for one new observation.
///
/// "absolute" fires when the price is at or under the configured value.
/// "percent" fires when the price undercuts the cheapest prior observation
/// by at least the configured percentage; with no prior observation there
/// is nothing to undercut.
pub fn price_alert_hit(kind: &str, value: f64, best_prior: Option<f64>, price: f64) -> bool {
    if !price.is_finite() || price <= 0.0 {
        return false;
    }

    match kind {
        "absolute" => price <= value,
        "percent" => match best_prior {
            Some(prior) if prior > 0.0 => price <= prior * (1.0 - value / 100.0),
            _ => false,
        },
        _ => false,
    }
}
