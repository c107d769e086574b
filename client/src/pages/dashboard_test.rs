use std::collections::BTreeMap;

use super::*;
use time::macros::date;

#[test]
fn spend_lines_default_to_zero_dollars() {
    assert_eq!(spend_lines(&DashboardSummary::default()), ["$0.00"]);
}

#[test]
fn spend_lines_format_each_currency() {
    let summary = DashboardSummary {
        monthly_spend: BTreeMap::from([("EUR".to_owned(), 9.5), ("USD".to_owned(), 1234.5)]),
        ..DashboardSummary::default()
    };
    assert_eq!(spend_lines(&summary), ["€9.50", "$1,234.50"]);
}

#[test]
fn renewal_line_reads_naturally() {
    let renewal = UpcomingRenewal {
        subscription_id: 4,
        service: "Netflix".to_owned(),
        plan: "Premium".to_owned(),
        price: 15.99,
        currency: "USD".to_owned(),
        date: date!(2025 - 03 - 04),
        days_until: 3,
    };
    assert_eq!(renewal_line(&renewal, date!(2025 - 03 - 01)), "Netflix (Premium): $15.99, in 3 days");
}
