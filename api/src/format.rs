//! Display formatting shared by the views and the terminal client.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::Date;

use crate::dates::parse_date;

/// Money in the user's currency: `$1,234.56`, `€9.99`, `R$ 1.234,56`,
/// otherwise `<CODE> 12.00`.
#[must_use]
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let sign = if amount < 0.0 { "-" } else { "" };
    let amount = amount.abs();
    match code.as_str() {
        "" | "USD" => format!("{sign}${}", group(amount, ',', '.')),
        "EUR" => format!("{sign}€{}", group(amount, ',', '.')),
        "GBP" => format!("{sign}£{}", group(amount, ',', '.')),
        "BRL" => format!("{sign}R$ {}", group(amount, '.', ',')),
        _ => format!("{sign}{code} {}", group(amount, ',', '.')),
    }
}

/// Two decimals with thousands grouping.
fn group(amount: f64, thousands: char, decimal: char) -> String {
    let fixed = format!("{amount:.2}");
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(digit);
    }
    grouped.push(decimal);
    grouped.push_str(cents);
    grouped
}

/// `Jan 5, 2025`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!("{} {}, {}", short_month(date.month()), date.day(), date.year())
}

/// [`format_date`] for a raw server string; unreadable input yields `fallback`.
#[must_use]
pub fn format_date_str(raw: Option<&str>, fallback: &str) -> String {
    raw.and_then(parse_date).map_or_else(|| fallback.to_owned(), format_date)
}

/// `January 2025`, or `Unknown` without a readable date.
#[must_use]
pub fn member_since(created_at: Option<&str>) -> String {
    created_at
        .and_then(parse_date)
        .map_or_else(|| "Unknown".to_owned(), |date| format!("{} {}", date.month(), date.year()))
}

/// First letters of the first and last words, uppercase; `U` for no name.
#[must_use]
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |word: &str| word.chars().next().map(|c| c.to_uppercase().collect::<String>());
    match words.as_slice() {
        [] => "U".to_owned(),
        [only] => first_letter(*only).unwrap_or_default(),
        [first, .., last] => {
            let mut out = first_letter(*first).unwrap_or_default();
            out.push_str(&first_letter(*last).unwrap_or_default());
            out
        }
    }
}

fn short_month(month: time::Month) -> &'static str {
    use time::Month::{
        April, August, December, February, January, July, June, March, May, November, October, September,
    };
    match month {
        January => "Jan",
        February => "Feb",
        March => "Mar",
        April => "Apr",
        May => "May",
        June => "Jun",
        July => "Jul",
        August => "Aug",
        September => "Sep",
        October => "Oct",
        November => "Nov",
        December => "Dec",
    }
}
