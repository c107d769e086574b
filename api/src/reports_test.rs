use serde_json::json;
use time::macros::date;

use super::*;

fn sub(id: i64, service: Option<&str>, price: f64, status: &str, next: Option<&str>) -> Subscription {
    serde_json::from_value(json!({
        "id": id,
        "service_id": id,
        "service_name": service,
        "plan": "Premium",
        "price": price,
        "currency": "USD",
        "billing_cycle": "monthly",
        "status": status,
        "next_billing_date": next
    }))
    .unwrap()
}

fn sample() -> Vec<Subscription> {
    vec![
        sub(1, Some("Netflix"), 15.99, "active", Some("2025-03-01")),
        sub(2, Some("Spotify"), 9.99, "paused", Some("2025-12-31")),
        sub(3, Some("Netflix"), 0.0, "canceled", Some("2026-01-01")),
        sub(4, Some(" "), 5.0, "active", None),
    ]
}

#[test]
fn year_filter_includes_last_day() {
    let subs = sample();
    let rows = ReportFilters::for_year(2025).apply(&subs);
    let ids: Vec<i64> = rows.iter().map(|sub| sub.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn undated_rows_drop_out_only_when_dates_filter() {
    let subs = sample();
    assert_eq!(ReportFilters::default().apply(&subs).len(), 4);
    let only_from = ReportFilters { date_from: Some(date!(2025 - 01 - 01)), ..ReportFilters::default() };
    assert_eq!(only_from.apply(&subs).len(), 3);
}

#[test]
fn service_and_status_filters_combine() {
    let subs = sample();
    let filters = ReportFilters {
        service: Some("Netflix".into()),
        status: Some(SubscriptionStatus::Canceled),
        ..ReportFilters::default()
    };
    let rows = filters.apply(&subs);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 3);
}

#[test]
fn service_names_are_distinct_and_non_blank() {
    assert_eq!(service_names(&sample()), vec!["Netflix".to_owned(), "Spotify".to_owned()]);
}

#[test]
fn summary_totals_filtered_rows() {
    let subs = sample();
    let rows = ReportFilters::for_year(2025).apply(&subs);
    let summary = summarize(&rows);
    assert_eq!(summary.count, 2);
    assert!((summary.total_expenses - 25.98).abs() < 1e-9);
    assert_eq!(summary.currency, "USD");
    assert_eq!(summarize(&[]).currency, DEFAULT_CURRENCY);
}

#[test]
fn csv_export_layout() {
    let subs = sample();
    let rows: Vec<&Subscription> = subs.iter().collect();
    let csv = export(&rows, ExportFormat::Csv);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Service,Plan,Price,Status,Next Billing");
    assert_eq!(lines[1], "Netflix,Premium,$15.99,Active,2025-03-01");
    assert_eq!(lines[2], "Spotify,Premium,$9.99,Inactive,2025-12-31");
    assert_eq!(lines[3], "Netflix,Premium,N/A,Inactive,2026-01-01");
    assert_eq!(lines[4], "N/A,Premium,$5.00,Active,N/A");
    assert_eq!(lines.len(), 5);
}

#[test]
fn xls_export_is_tab_separated() {
    let subs = vec![sub(1, Some("Adobe, Inc"), 25.99, "active", Some("2025-05-05"))];
    let rows: Vec<&Subscription> = subs.iter().collect();
    let xls = export(&rows, ExportFormat::Xls);
    assert_eq!(xls.lines().nth(1), Some("Adobe, Inc\tPremium\t$25.99\tActive\t2025-05-05"));
}

#[test]
fn csv_quotes_delimiters_and_quotes() {
    let subs = vec![sub(1, Some("Adobe, \"CC\""), 25.99, "active", Some("2025-05-05"))];
    let rows: Vec<&Subscription> = subs.iter().collect();
    let csv = export(&rows, ExportFormat::Csv);
    assert_eq!(csv.lines().nth(1), Some("\"Adobe, \"\"CC\"\"\",Premium,$25.99,Active,2025-05-05"));
}

#[test]
fn filename_and_format_parsing() {
    assert_eq!(export_filename(ExportFormat::Csv, date!(2025 - 06 - 10)), "subscription-reports-2025-06-10.csv");
    assert_eq!(export_filename(ExportFormat::Xls, date!(2025 - 06 - 10)), "subscription-reports-2025-06-10.xls");
    assert_eq!(ExportFormat::parse("XLSX"), Some(ExportFormat::Xls));
    assert_eq!(ExportFormat::parse("pdf"), None);
}

fn service(id: i64, name: &str) -> Service {
    serde_json::from_value(json!({ "id": id, "name": name, "category": "Cloud" })).unwrap()
}

#[test]
fn missing_service_names_come_from_services() {
    let rows = vec![
        sub(7, None, 1.0, "active", None),
        sub(8, Some("Figma"), 1.0, "active", None),
        sub(9, Some(" "), 1.0, "active", None),
    ];
    let named = with_service_names(rows, &[service(7, "AWS"), service(9, "GitHub")]);
    let names: Vec<Option<&str>> = named.iter().map(|s| s.service_name.as_deref()).collect();
    assert_eq!(names, [Some("AWS"), Some("Figma"), Some("GitHub")]);
}

#[test]
fn unknown_service_stays_unnamed() {
    let named = with_service_names(vec![sub(42, None, 1.0, "active", None)], &[service(7, "AWS")]);
    assert_eq!(named[0].service_name, None);
}
