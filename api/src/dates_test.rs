use time::macros::date;

use super::*;

#[test]
fn parse_date_reads_plain_dates() {
    assert_eq!(parse_date("2025-03-09"), Some(date!(2025 - 03 - 09)));
}

#[test]
fn parse_date_reads_timestamp_prefix() {
    assert_eq!(parse_date("2025-01-05T12:30:00.000000Z"), Some(date!(2025 - 01 - 05)));
    assert_eq!(parse_date("2025-01-05 12:30:00"), Some(date!(2025 - 01 - 05)));
}

#[test]
fn parse_date_rejects_garbage() {
    assert_eq!(parse_date(""), None);
    assert_eq!(parse_date("soon"), None);
    assert_eq!(parse_date("2025-13-01"), None);
    assert_eq!(parse_date("05/01/2025"), None);
}

#[test]
fn iso_date_zero_pads() {
    assert_eq!(iso_date(date!(2025 - 01 - 05)), "2025-01-05");
}

#[test]
fn days_until_is_signed() {
    let today = date!(2025 - 06 - 10);
    assert_eq!(days_until(date!(2025 - 06 - 15), today), 5);
    assert_eq!(days_until(date!(2025 - 06 - 08), today), -2);
    assert_eq!(days_between(date!(2025 - 06 - 15), today), 5);
}

#[test]
fn is_past_excludes_today() {
    let today = date!(2025 - 06 - 10);
    assert!(!is_past(today, today));
    assert!(is_past(date!(2025 - 06 - 09), today));
}

#[test]
fn relative_days_phrases() {
    let today = date!(2025 - 06 - 10);
    assert_eq!(relative_days(today, today), "today");
    assert_eq!(relative_days(date!(2025 - 06 - 11), today), "tomorrow");
    assert_eq!(relative_days(date!(2025 - 06 - 09), today), "yesterday");
    assert_eq!(relative_days(date!(2025 - 06 - 20), today), "in 10 days");
    assert_eq!(relative_days(date!(2025 - 06 - 07), today), "3 days ago");
}
