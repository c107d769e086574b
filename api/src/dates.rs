//! Calendar-date helpers for the server's `YYYY-MM-DD` strings.
//!
//! The server sends plain dates (`next_billing_date`) and timestamps
//! (`created_at`); both are read by their leading date component. "Today" is
//! always passed in by the caller so results stay deterministic.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::Date;
use time::macros::format_description;

/// Parse the leading `YYYY-MM-DD` of a date or timestamp string.
#[must_use]
pub fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    let head = raw.get(..10)?;
    Date::parse(head, format_description!("[year]-[month]-[day]")).ok()
}

/// `YYYY-MM-DD` rendering used on the wire and in exports.
#[must_use]
pub fn iso_date(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Whole days from `today` until `date`; negative once it has passed.
#[must_use]
pub fn days_until(date: Date, today: Date) -> i64 {
    (date - today).whole_days()
}

/// Absolute number of days between two dates.
#[must_use]
pub fn days_between(a: Date, b: Date) -> i64 {
    (b - a).whole_days().abs()
}

/// A billing date strictly before `today` has lapsed.
#[must_use]
pub fn is_past(date: Date, today: Date) -> bool {
    date < today
}

/// Short relative phrase for an upcoming date: "today", "tomorrow", "in 5 days", "3 days ago".
#[must_use]
pub fn relative_days(date: Date, today: Date) -> String {
    match days_until(date, today) {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        -1 => "yesterday".to_owned(),
        n if n > 1 => format!("in {n} days"),
        n => format!("{} days ago", -n),
    }
}
