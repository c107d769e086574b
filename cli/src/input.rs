//! Command-line flags turned into validated core values.
//!
//! Full creates and updates go through the same form validators the web
//! client uses, so both front ends reject the same input with the same
//! messages. Partial subscription updates validate only the flags given.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use clap::Args;
use techsubs_api::FieldErrors;
use techsubs_api::billing::BillingCycle;
use techsubs_api::dates::{iso_date, parse_date};
use techsubs_api::reports::{ExportFormat, ReportFilters};
use techsubs_api::types::{Service, SubscriptionPatch, SubscriptionStatus, User};
use techsubs_api::validation::{ProfileForm, ServiceForm, SubscriptionForm};
use time::Date;

#[derive(Args, Debug, Clone, Default)]
pub struct ServiceFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long = "website")]
    pub website_url: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

impl ServiceFields {
    /// Overlay the given flags on `form`; absent flags keep the form's value.
    pub fn apply(self, mut form: ServiceForm) -> ServiceForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(category) = self.category {
            form.category = category;
        }
        if let Some(website_url) = self.website_url {
            form.website_url = website_url;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        form
    }

    pub fn edit(self, service: &Service) -> ServiceForm {
        self.apply(ServiceForm::edit(service))
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubscriptionFields {
    #[arg(long)]
    pub service_id: String,
    #[arg(long)]
    pub plan: String,
    #[arg(long)]
    pub price: String,
    #[arg(long, default_value = "USD")]
    pub currency: String,
    #[arg(long, default_value = "monthly")]
    pub cycle: String,
    #[arg(long, default_value = "active")]
    pub status: String,
    /// `YYYY-MM-DD`.
    #[arg(long)]
    pub next_billing: String,
}

impl From<SubscriptionFields> for SubscriptionForm {
    fn from(fields: SubscriptionFields) -> Self {
        Self {
            service_id: fields.service_id,
            plan: fields.plan,
            price: fields.price,
            currency: fields.currency,
            billing_cycle: fields.cycle,
            status: fields.status,
            next_billing_date: fields.next_billing,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct SubscriptionPatchFields {
    #[arg(long)]
    pub plan: Option<String>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub currency: Option<String>,
    #[arg(long)]
    pub cycle: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// `YYYY-MM-DD`.
    #[arg(long)]
    pub next_billing: Option<String>,
}

fn add(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.entry(field.to_owned()).or_default().push(message.to_owned());
}

impl SubscriptionPatchFields {
    /// # Errors
    ///
    /// Returns the field errors of every flag that fails to parse.
    pub fn to_patch(&self) -> Result<SubscriptionPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut patch = SubscriptionPatch::default();

        if let Some(plan) = &self.plan {
            if plan.trim().is_empty() {
                add(&mut errors, "plan", "Plan is required");
            } else {
                patch.plan = Some(plan.trim().to_owned());
            }
        }
        if let Some(price) = &self.price {
            match price.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => patch.price = Some(value),
                _ => add(&mut errors, "price", "Price must be greater than 0"),
            }
        }
        if let Some(currency) = &self.currency {
            let code = currency.trim().to_ascii_uppercase();
            if code.is_empty() {
                add(&mut errors, "currency", "Currency is required");
            } else {
                patch.currency = Some(code);
            }
        }
        if let Some(cycle) = &self.cycle {
            match BillingCycle::parse(cycle) {
                Some(cycle) => patch.billing_cycle = Some(cycle),
                None => add(&mut errors, "billing_cycle", "Billing cycle is required"),
            }
        }
        if let Some(status) = &self.status {
            match SubscriptionStatus::parse(status) {
                Some(status) => patch.status = Some(status),
                None => add(&mut errors, "status", "Status is required"),
            }
        }
        if let Some(raw) = &self.next_billing {
            match strict_date(raw) {
                Some(date) => patch.next_billing_date = Some(iso_date(date)),
                None => add(&mut errors, "next_billing_date", "Next billing date must be a valid date"),
            }
        }

        if errors.is_empty() { Ok(patch) } else { Err(errors) }
    }
}

/// Exactly `YYYY-MM-DD`.
fn strict_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if raw.len() == 10 { parse_date(raw) } else { None }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

impl ProfileFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Current profile with the given flags applied.
    pub fn edit(self, user: &User) -> ProfileForm {
        ProfileForm {
            name: self.name.unwrap_or_else(|| user.name.clone()),
            email: self.email.or_else(|| user.email.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportFilterFields {
    /// Whole calendar year; `--from`/`--to` narrow it further.
    #[arg(long)]
    pub year: Option<i32>,
    /// Earliest next-billing date, `YYYY-MM-DD`.
    #[arg(long)]
    pub from: Option<String>,
    /// Latest next-billing date, `YYYY-MM-DD`.
    #[arg(long)]
    pub to: Option<String>,
    #[arg(long)]
    pub service: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

impl ReportFilterFields {
    /// Unlike the web form, unreadable values are rejected instead of ignored.
    ///
    /// # Errors
    ///
    /// Returns the field errors of every flag that fails to parse.
    pub fn to_filters(&self) -> Result<ReportFilters, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut filters = self.year.map(ReportFilters::for_year).unwrap_or_default();

        for (field, raw, slot) in [
            ("date_from", &self.from, &mut filters.date_from),
            ("date_to", &self.to, &mut filters.date_to),
        ] {
            if let Some(raw) = raw {
                match strict_date(raw) {
                    Some(date) => *slot = Some(date),
                    None => add(&mut errors, field, "Dates must be YYYY-MM-DD"),
                }
            }
        }
        filters.service = self
            .service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        if let Some(raw) = &self.status {
            match SubscriptionStatus::parse(raw) {
                Some(status) => filters.status = Some(status),
                None => add(&mut errors, "status", "Status must be active, paused or canceled"),
            }
        }

        if errors.is_empty() { Ok(filters) } else { Err(errors) }
    }
}

/// clap value parser for `--format`.
///
/// # Errors
///
/// Returns a message naming the accepted formats.
pub fn export_format(raw: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(raw).ok_or_else(|| format!("unknown format {raw:?}; expected csv or xls"))
}

/// clap value parser for `--status` on listings.
///
/// # Errors
///
/// Returns a message naming the accepted statuses.
pub fn status_filter(raw: &str) -> Result<SubscriptionStatus, String> {
    SubscriptionStatus::parse(raw).ok_or_else(|| format!("unknown status {raw:?}; expected active, paused or canceled"))
}
