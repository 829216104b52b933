use farewatch::models::FlightResult;
use farewatch::services::cadence;
use mongodb::bson::oid::ObjectId;

const DAY: i64 = 86_400;

fn result(price: f64, observed_at: i64) -> FlightResult {
    FlightResult {
        id: ObjectId::new(),
        tracker_id: ObjectId::new(),
        price,
        currency: "EUR".to_string(),
        carrier: "XX".to_string(),
        observed_at,
    }
}

#[test]
fn never_reported_tracker_with_results_is_due_for_every_cadence() {
    let now = 1_700_000_000;

    for cadence_name in ["daily", "weekly", "monthly"] {
        assert!(
            cadence::is_report_due(cadence_name, None, true, now),
            "{cadence_name} should be due with no prior report"
        );
    }
}

#[test]
fn tracker_without_results_is_never_due() {
    let now = 1_700_000_000;

    assert!(!cadence::is_report_due("daily", None, false, now));
    // even with a long-expired window
    assert!(!cadence::is_report_due("daily", Some(now - 90 * DAY), false, now));
}

#[test]
fn weekly_boundary_is_inclusive() {
    let now = 1_700_000_000;
    let exactly_seven_days = now - 7 * DAY;

    assert!(cadence::is_report_due("weekly", Some(exactly_seven_days), true, now));
}

#[test]
fn weekly_just_under_boundary_is_not_due() {
    let now = 1_700_000_000;
    // 6.99 days ago
    let last = now - (6.99 * DAY as f64) as i64;

    assert!(!cadence::is_report_due("weekly", Some(last), true, now));
}

#[test]
fn daily_and_monthly_periods_apply() {
    let now = 1_700_000_000;

    assert!(cadence::is_report_due("daily", Some(now - DAY), true, now));
    assert!(!cadence::is_report_due("daily", Some(now - DAY + 60), true, now));

    assert!(cadence::is_report_due("monthly", Some(now - 30 * DAY), true, now));
    assert!(!cadence::is_report_due("monthly", Some(now - 29 * DAY), true, now));
}

#[test]
fn unknown_cadence_is_never_due_once_reported() {
    let now = 1_700_000_000;

    assert_eq!(cadence::cadence_period_days("fortnightly"), None);
    assert!(!cadence::is_report_due("fortnightly", Some(now - 365 * DAY), true, now));
    // a first report still goes out; absence of history dominates
    assert!(cadence::is_report_due("fortnightly", None, true, now));
}

#[test]
fn cheapest_orders_by_price_and_truncates() {
    let results = vec![
        result(310.0, 10),
        result(150.0, 20),
        result(220.0, 30),
        result(150.0, 5),
        result(990.0, 40),
        result(180.0, 50),
    ];

    let picks = cadence::cheapest(&results, 5);

    assert_eq!(picks.len(), 5);
    let prices: Vec<f64> = picks.iter().map(|r| r.price).collect();
    assert_eq!(prices, vec![150.0, 150.0, 180.0, 220.0, 310.0]);

    // earlier observation wins the price tie
    assert_eq!(picks[0].observed_at, 5);
    assert_eq!(picks[1].observed_at, 20);
}

#[test]
fn absolute_alert_fires_at_or_under_threshold() {
    assert!(cadence::price_alert_hit("absolute", 200.0, None, 200.0));
    assert!(cadence::price_alert_hit("absolute", 200.0, None, 149.5));
    assert!(!cadence::price_alert_hit("absolute", 200.0, None, 200.01));
}

#[test]
fn percent_alert_needs_a_prior_observation() {
    assert!(!cadence::price_alert_hit("percent", 10.0, None, 1.0));

    // 10% under a 300 prior
    assert!(cadence::price_alert_hit("percent", 10.0, Some(300.0), 270.0));
    assert!(!cadence::price_alert_hit("percent", 10.0, Some(300.0), 271.0));
}

#[test]
fn garbage_prices_never_alert() {
    assert!(!cadence::price_alert_hit("absolute", 200.0, None, f64::NAN));
    assert!(!cadence::price_alert_hit("absolute", 200.0, None, -5.0));
    assert!(!cadence::price_alert_hit("bogus", 200.0, Some(300.0), 1.0));
}
