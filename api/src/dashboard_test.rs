use serde_json::json;
use time::macros::date;

use super::*;

fn sub(id: i64, price: f64, currency: &str, cycle: &str, status: &str, next: &str) -> Subscription {
    serde_json::from_value(json!({
        "id": id,
        "service_id": id,
        "service_name": format!("Service {id}"),
        "plan": "Plan",
        "price": price,
        "currency": currency,
        "billing_cycle": cycle,
        "status": status,
        "next_billing_date": next
    }))
    .unwrap()
}

#[test]
fn counts_and_monthly_spend_by_currency() {
    let subs = vec![
        sub(1, 15.0, "USD", "monthly", "active", "2025-06-20"),
        sub(2, 120.0, "USD", "annual", "active", "2026-01-01"),
        sub(3, 30.0, "EUR", "quarterly", "active", "2025-07-01"),
        sub(4, 99.0, "USD", "monthly", "canceled", "2025-06-12"),
    ];

    let summary = summarize(&subs, &[], date!(2025 - 06 - 10), DEFAULT_HORIZON_DAYS);

    assert_eq!(summary.total_subscriptions, 4);
    assert_eq!(summary.active_subscriptions, 3);
    assert_eq!(summary.total_services, 0);
    assert!((summary.spend_in("USD") - 25.0).abs() < 1e-9);
    assert!((summary.spend_in("EUR") - 10.0).abs() < 1e-9);
    assert!(summary.spend_in("GBP").abs() < f64::EPSILON);
}

#[test]
fn upcoming_renewals_are_windowed_and_sorted() {
    let subs = vec![
        sub(1, 15.0, "USD", "monthly", "active", "2025-07-01"),
        sub(2, 5.0, "USD", "monthly", "active", "2025-06-10"),
        sub(3, 5.0, "USD", "monthly", "active", "2025-06-09"),
        sub(4, 5.0, "USD", "monthly", "active", "2025-08-30"),
        sub(5, 5.0, "USD", "monthly", "paused", "2025-06-11"),
    ];

    let summary = summarize(&subs, &[], date!(2025 - 06 - 10), 30);

    let ids: Vec<i64> = summary.upcoming.iter().map(|renewal| renewal.subscription_id).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(summary.upcoming[0].days_until, 0);
    assert_eq!(summary.upcoming[1].days_until, 21);
    assert_eq!(summary.upcoming[1].service, "Service 1");
}
