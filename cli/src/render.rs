//! Plain-text rendering for terminal output.
//!
//! Everything returns a `String` so the layout is testable; `main` decides
//! where it goes. `--json` bypasses this module entirely.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use serde::Serialize;
use techsubs_api::billing::monthly_equivalent;
use techsubs_api::dashboard::DashboardSummary;
use techsubs_api::dates::{parse_date, relative_days};
use techsubs_api::format::{format_currency, format_date, format_date_str, member_since};
use techsubs_api::reports::ReportSummary;
use techsubs_api::types::{Service, Stats, Subscription, User};
use time::Date;

use crate::error::CliError;

const NONE: &str = "-";

/// Left-aligned columns separated by two spaces, widths from the widest cell.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| (*h).to_owned()).collect();
    push_row(&mut out, &widths, &header);
    for row in rows {
        push_row(&mut out, &widths, row);
    }
    out
}

fn push_row(out: &mut String, widths: &[usize], cells: &[String]) {
    let mut line = String::new();
    for (index, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `label: value` lines with the labels padded to one width.
pub fn fields(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(label, _)| label.len() + 1).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in pairs {
        let _ = writeln!(out, "{:<width$} {value}", format!("{label}:"));
    }
    out
}

fn or_none(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map_or_else(|| NONE.to_owned(), str::to_owned)
}

pub fn services_table(services: &[Service]) -> String {
    if services.is_empty() {
        return "No services yet.\n".to_owned();
    }
    let rows: Vec<Vec<String>> = services
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                s.category.clone(),
                or_none(s.website_url.as_deref()),
            ]
        })
        .collect();
    table(&["ID", "NAME", "CATEGORY", "WEBSITE"], &rows)
}

pub fn service_detail(service: &Service) -> String {
    fields(&[
        ("ID", service.id.to_string()),
        ("Name", service.name.clone()),
        ("Category", service.category.clone()),
        ("Website", or_none(service.website_url.as_deref())),
        ("Description", or_none(service.description.as_deref())),
        ("Created", format_date_str(service.created_at.as_deref(), NONE)),
        ("Updated", format_date_str(service.updated_at.as_deref(), NONE)),
    ])
}

/// `Mar 1, 2025 (in 5 days)`, or `-` without a readable date.
pub fn next_billing(raw: Option<&str>, today: Date) -> String {
    raw.and_then(parse_date).map_or_else(
        || NONE.to_owned(),
        |date| format!("{} ({})", format_date(date), relative_days(date, today)),
    )
}

pub fn subscriptions_table(subscriptions: &[Subscription], services: &[Service], today: Date) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions found.\n".to_owned();
    }
    let rows: Vec<Vec<String>> = subscriptions
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.service_label(services),
                s.plan.clone(),
                format_currency(s.price, &s.currency),
                s.cycle().label().to_owned(),
                s.status.label().to_owned(),
                next_billing(s.next_billing_date.as_deref(), today),
            ]
        })
        .collect();
    table(&["ID", "SERVICE", "PLAN", "PRICE", "CYCLE", "STATUS", "NEXT BILLING"], &rows)
}

pub fn subscription_detail(subscription: &Subscription, services: &[Service], today: Date) -> String {
    let cycle = subscription.cycle();
    fields(&[
        ("ID", subscription.id.to_string()),
        ("Service", subscription.service_label(services)),
        ("Plan", subscription.plan.clone()),
        ("Price", format_currency(subscription.price, &subscription.currency)),
        ("Billing cycle", cycle.label().to_owned()),
        (
            "Per month",
            format_currency(monthly_equivalent(subscription.price, cycle), &subscription.currency),
        ),
        ("Status", subscription.status.label().to_owned()),
        ("Next billing", next_billing(subscription.next_billing_date.as_deref(), today)),
        ("Created", format_date_str(subscription.created_at.as_deref(), NONE)),
    ])
}

/// Name, else email, else `Account`.
pub fn display_name(user: &User) -> String {
    [Some(user.name.as_str()), user.email.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or("Account")
        .to_owned()
}

pub fn user_detail(user: &User) -> String {
    fields(&[
        ("Name", user.name.clone()),
        ("Email", or_none(user.email.as_deref())),
        ("Role", or_none(user.role.as_deref())),
        ("Member since", member_since(user.created_at.as_deref())),
    ])
}

/// `total_monthly_cost` -> `Total monthly cost`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Server-defined counters; nested values are shown as compact JSON.
pub fn stats(stats: &Stats) -> String {
    if stats.is_empty() {
        return "No statistics available.\n".to_owned();
    }
    let pairs: Vec<(String, String)> = stats
        .iter()
        .map(|(key, value)| {
            let shown = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (humanize_key(key), shown)
        })
        .collect();
    let borrowed: Vec<(&str, String)> = pairs.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
    fields(&borrowed)
}

pub fn dashboard(summary: &DashboardSummary, today: Date) -> String {
    let mut out = fields(&[
        ("Services", summary.total_services.to_string()),
        ("Subscriptions", summary.total_subscriptions.to_string()),
        ("Active", summary.active_subscriptions.to_string()),
    ]);
    out.push_str("\nMonthly spend\n");
    if summary.monthly_spend.is_empty() {
        out.push_str("  none\n");
    }
    for (currency, amount) in &summary.monthly_spend {
        let _ = writeln!(out, "  {}", format_currency(*amount, currency));
    }
    out.push_str("\nUpcoming renewals\n");
    if summary.upcoming.is_empty() {
        out.push_str("  none\n");
        return out;
    }
    let rows: Vec<Vec<String>> = summary
        .upcoming
        .iter()
        .map(|r| {
            vec![
                r.service.clone(),
                r.plan.clone(),
                format_currency(r.price, &r.currency),
                format!("{} ({})", format_date(r.date), relative_days(r.date, today)),
            ]
        })
        .collect();
    for line in table(&["SERVICE", "PLAN", "PRICE", "DATE"], &rows).lines() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

pub fn report_summary(summary: &ReportSummary) -> String {
    fields(&[
        ("Subscriptions", summary.count.to_string()),
        ("Total expenses", format_currency(summary.total_expenses, &summary.currency)),
    ])
}

/// # Errors
///
/// Returns [`CliError::Json`] when `value` cannot be serialized.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}
