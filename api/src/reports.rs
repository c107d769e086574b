//! Subscription reports: filtering, totals and file export.
//!
//! DESIGN
//! ======
//! Filtering happens client-side over the full `/subscriptions` list. The
//! same [`ReportFilters`] drive the on-screen table and the exported file, so
//! what the user sees is what they download. Exports are plain delimited
//! text; "XLS" is tab-separated text that spreadsheet apps open directly.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use time::Date;

use crate::dates::{iso_date, parse_date};
use crate::types::{DEFAULT_CURRENCY, Service, Subscription, SubscriptionStatus};

const EXPORT_HEADER: [&str; 5] = ["Service", "Plan", "Price", "Status", "Next Billing"];
const MISSING: &str = "N/A";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportFilters {
    /// Earliest next-billing date, inclusive.
    pub date_from: Option<Date>,
    /// Latest next-billing date, inclusive.
    pub date_to: Option<Date>,
    /// Exact service name; `None` means all services.
    pub service: Option<String>,
    /// `None` means every status.
    pub status: Option<SubscriptionStatus>,
}

impl ReportFilters {
    /// Whole calendar year, every service and status.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        Self {
            date_from: Date::from_ordinal_date(year, 1).ok(),
            date_to: Date::from_calendar_date(year, time::Month::December, 31).ok(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matches(&self, subscription: &Subscription) -> bool {
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(next) = subscription.next_billing_date.as_deref().and_then(parse_date) else {
                return false;
            };
            if self.date_from.is_some_and(|from| next < from) || self.date_to.is_some_and(|to| next > to) {
                return false;
            }
        }
        if let Some(service) = &self.service {
            if subscription.service_name.as_deref() != Some(service.as_str()) {
                return false;
            }
        }
        self.status.is_none_or(|status| subscription.status == status)
    }

    #[must_use]
    pub fn apply<'a>(&self, subscriptions: &'a [Subscription]) -> Vec<&'a Subscription> {
        subscriptions.iter().filter(|sub| self.matches(sub)).collect()
    }
}

/// Distinct, non-blank service names in first-seen order, for the filter dropdown.
#[must_use]
pub fn service_names(subscriptions: &[Subscription]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in subscriptions.iter().filter_map(|sub| sub.service_name.as_deref()) {
        if !name.trim().is_empty() && !names.iter().any(|seen| seen == name) {
            names.push(name.to_owned());
        }
    }
    names
}

/// Fill in `service_name` from the service list where the server left it out,
/// so the service filter and export see every row's name.
#[must_use]
pub fn with_service_names(mut subscriptions: Vec<Subscription>, services: &[Service]) -> Vec<Subscription> {
    for sub in &mut subscriptions {
        if sub.service_name.as_deref().is_none_or(|name| name.trim().is_empty()) {
            sub.service_name = services.iter().find(|s| s.id == sub.service_id).map(|s| s.name.clone());
        }
    }
    subscriptions
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportSummary {
    pub count: usize,
    pub total_expenses: f64,
    /// Currency of the first row; totals are not converted.
    pub currency: String,
}

#[must_use]
pub fn summarize(rows: &[&Subscription]) -> ReportSummary {
    ReportSummary {
        count: rows.len(),
        total_expenses: rows.iter().map(|sub| sub.price).sum(),
        currency: rows
            .first()
            .map_or_else(|| DEFAULT_CURRENCY.to_owned(), |sub| sub.currency.clone()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    /// Tab-separated text with an `.xls` name.
    Xls,
}

impl ExportFormat {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xls" | "xlsx" | "excel" => Some(Self::Xls),
            _ => None,
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xls => "xls",
        }
    }

    #[must_use]
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xls => "application/vnd.ms-excel",
        }
    }

    fn delimiter(self) -> char {
        match self {
            Self::Csv => ',',
            Self::Xls => '\t',
        }
    }
}

/// Render rows as delimited text, one line per row after the header.
#[must_use]
pub fn export(rows: &[&Subscription], format: ExportFormat) -> String {
    let delimiter = format.delimiter();
    let mut out = String::new();
    push_line(&mut out, delimiter, EXPORT_HEADER.map(str::to_owned));
    for sub in rows {
        let service = non_blank(sub.service_name.as_deref());
        let plan = non_blank(Some(&sub.plan));
        let price = if sub.price > 0.0 {
            format!("${:.2}", sub.price)
        } else {
            MISSING.to_owned()
        };
        let status = if sub.is_active() { "Active" } else { "Inactive" };
        let next = sub
            .next_billing_date
            .as_deref()
            .and_then(parse_date)
            .map_or_else(|| MISSING.to_owned(), iso_date);
        push_line(&mut out, delimiter, [service, plan, price, status.to_owned(), next]);
    }
    out
}

/// `subscription-reports-YYYY-MM-DD.<ext>`.
#[must_use]
pub fn export_filename(format: ExportFormat, today: Date) -> String {
    format!("subscription-reports-{}.{}", iso_date(today), format.extension())
}

fn non_blank(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(MISSING)
        .to_owned()
}

fn push_line(out: &mut String, delimiter: char, fields: [String; 5]) {
    for (index, field) in fields.iter().enumerate() {
        if index > 0 {
            out.push(delimiter);
        }
        out.push_str(&quote(field, delimiter));
    }
    out.push('\n');
}

fn quote(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains(['"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}
