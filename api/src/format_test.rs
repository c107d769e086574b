use time::macros::date;

use super::*;

#[test]
fn currency_symbols_and_grouping() {
    assert_eq!(format_currency(1234.56, "USD"), "$1,234.56");
    assert_eq!(format_currency(15.0, "usd"), "$15.00");
    assert_eq!(format_currency(9.99, "EUR"), "€9.99");
    assert_eq!(format_currency(1_000_000.0, "GBP"), "£1,000,000.00");
    assert_eq!(format_currency(1234.56, "BRL"), "R$ 1.234,56");
    assert_eq!(format_currency(12.0, "JPY"), "JPY 12.00");
    assert_eq!(format_currency(-5.5, "USD"), "-$5.50");
    assert_eq!(format_currency(0.0, ""), "$0.00");
}

#[test]
fn currency_rounds_to_cents() {
    assert_eq!(format_currency(999.999, "USD"), "$1,000.00");
}

#[test]
fn dates_read_like_prose() {
    assert_eq!(format_date(date!(2025 - 01 - 05)), "Jan 5, 2025");
    assert_eq!(format_date_str(Some("2025-12-31T08:00:00Z"), "-"), "Dec 31, 2025");
    assert_eq!(format_date_str(None, "-"), "-");
    assert_eq!(format_date_str(Some("soon"), "Unknown"), "Unknown");
}

#[test]
fn member_since_month_and_year() {
    assert_eq!(member_since(Some("2025-01-15T10:00:00Z")), "January 2025");
    assert_eq!(member_since(None), "Unknown");
}

#[test]
fn initials_from_first_and_last_word() {
    assert_eq!(initials("Ada Lovelace"), "AL");
    assert_eq!(initials("ada byron king lovelace"), "AL");
    assert_eq!(initials("cher"), "C");
    assert_eq!(initials("   "), "U");
}
