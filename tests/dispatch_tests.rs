use farewatch::models::{FlightResult, Tracker};
use farewatch::services::report_runner::{dispatch_batch, report_summary};
use mongodb::bson::oid::ObjectId;

fn tracker(origin: &str) -> Tracker {
    Tracker {
        id: ObjectId::new(),
        user_id: ObjectId::new(),
        origin: origin.to_string(),
        destination: "LIS".to_string(),
        depart_date: "2026-10-01".to_string(),
        return_date: None,
        status: "active".to_string(),
        cadence: "weekly".to_string(),
        alert_kind: "percent".to_string(),
        alert_value: 10.0,
        last_checked_at: None,
        created_at: 1_700_000_000,
    }
}

fn result(price: f64) -> FlightResult {
    FlightResult {
        id: ObjectId::new(),
        tracker_id: ObjectId::new(),
        price,
        currency: "EUR".to_string(),
        carrier: "XX".to_string(),
        observed_at: 1_700_000_000,
    }
}

#[tokio::test]
async fn failed_send_does_not_stop_the_batch() {
    let batch = vec![
        (tracker("AMS"), vec![result(100.0)]),
        (tracker("BER"), vec![result(200.0)]),
        (tracker("CDG"), vec![result(300.0)]),
        (tracker("DUB"), vec![result(400.0)]),
    ];

    // the second tracker's send blows up
    let poison = batch[1].0.id;

    let mut attempted: Vec<ObjectId> = Vec::new();

    let outcome = dispatch_batch(batch, |t, _results| {
        attempted.push(t.id);
        let fail = t.id == poison;
        async move {
            if fail {
                Err("mail provider exploded".to_string())
            } else {
                Ok(())
            }
        }
    })
    .await;

    assert_eq!(attempted.len(), 4, "every candidate must be attempted");
    assert_eq!(outcome.processed, 4);
    assert_eq!(outcome.sent, 3);
    assert_eq!(outcome.failed, 1);
}

#[tokio::test]
async fn empty_batch_sends_nothing() {
    let outcome = dispatch_batch(Vec::new(), |_t, _results| async { Ok(()) }).await;

    assert_eq!(outcome.processed, 0);
    assert_eq!(outcome.sent, 0);
    assert_eq!(outcome.failed, 0);
}

#[tokio::test]
async fn all_failures_are_counted() {
    let batch = vec![
        (tracker("AMS"), vec![result(100.0)]),
        (tracker("BER"), vec![result(200.0)]),
    ];

    let outcome =
        dispatch_batch(batch, |_t, _results| async { Err("down".to_string()) }).await;

    assert_eq!(outcome.processed, 2);
    assert_eq!(outcome.sent, 0);
    assert_eq!(outcome.failed, 2);
}

#[test]
fn summary_lists_route_and_offers() {
    let t = tracker("AMS");
    let picks = vec![result(129.99), result(154.5)];

    let summary = report_summary(&t, &picks);

    assert!(summary.contains("AMS -> LIS"));
    assert!(summary.contains("2026-10-01"));
    assert!(summary.contains("129.99 EUR"));
    assert!(summary.contains("154.50 EUR"));
}
