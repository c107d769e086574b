//! Client-side form validation.
//!
//! Forms hold raw input strings as typed. Validation returns a
//! [`FieldErrors`] map, the same shape a 422 response carries, so a form
//! renders local and server errors the same way. Converting a valid form
//! yields the typed request body.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::billing::BillingCycle;
use crate::dates::{iso_date, parse_date};
use crate::error::FieldErrors;
use crate::types::{
    DEFAULT_CURRENCY, PasswordChange, ProfileUpdate, Service, ServiceInput, Subscription, SubscriptionInput,
    SubscriptionStatus,
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Whether a form creates a record or edits an existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// `http(s)://` followed by a host.
#[must_use]
pub fn is_valid_url(raw: &str) -> bool {
    let raw = raw.trim();
    let Some(rest) = raw.strip_prefix("https://").or_else(|| raw.strip_prefix("http://")) else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !host.is_empty() && !raw.contains(char::is_whitespace) && !host.starts_with('.') && !host.ends_with(':')
}

/// Loose shape check; the server has the final word.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    let raw = raw.trim();
    match raw.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !raw.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn add(errors: &mut FieldErrors, field: &str, message: &str) {
    errors.entry(field.to_owned()).or_default().push(message.to_owned());
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

// =============================================================================
// SERVICES
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceForm {
    pub mode: FormMode,
    pub name: String,
    pub category: String,
    pub website_url: String,
    pub description: String,
}

impl ServiceForm {
    #[must_use]
    pub fn create() -> Self {
        Self::default()
    }

    /// Prefilled from an existing service.
    #[must_use]
    pub fn edit(service: &Service) -> Self {
        Self {
            mode: FormMode::Edit,
            name: service.name.clone(),
            category: service.category.clone(),
            website_url: service.website_url.clone().unwrap_or_default(),
            description: service.description.clone().unwrap_or_default(),
        }
    }

    /// New services need every field; edits only name and category.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let creating = self.mode == FormMode::Create;
        if blank(&self.name) {
            add(&mut errors, "name", if creating { "Name is required" } else { "Service name is required" });
        }
        if blank(&self.category) {
            add(&mut errors, "category", "Category is required");
        }
        if creating && blank(&self.description) {
            add(&mut errors, "description", "Description is required");
        }
        if blank(&self.website_url) {
            if creating {
                add(&mut errors, "website_url", "Website is required");
            }
        } else if !is_valid_url(&self.website_url) {
            add(
                &mut errors,
                "website_url",
                if creating { "Invalid URL format" } else { "Please enter a valid URL" },
            );
        }
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_input(&self) -> Result<ServiceInput, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ServiceInput {
            name: self.name.trim().to_owned(),
            category: self.category.trim().to_owned(),
            website_url: optional(&self.website_url),
            description: optional(&self.description),
        })
    }
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionForm {
    pub service_id: String,
    pub plan: String,
    pub price: String,
    pub currency: String,
    pub billing_cycle: String,
    pub status: String,
    pub next_billing_date: String,
}

impl Default for SubscriptionForm {
    fn default() -> Self {
        Self {
            service_id: String::new(),
            plan: String::new(),
            price: String::new(),
            currency: DEFAULT_CURRENCY.to_owned(),
            billing_cycle: BillingCycle::Monthly.as_str().to_owned(),
            status: SubscriptionStatus::Active.as_str().to_owned(),
            next_billing_date: String::new(),
        }
    }
}

impl SubscriptionForm {
    /// Prefilled from an existing subscription.
    #[must_use]
    pub fn edit(subscription: &Subscription) -> Self {
        Self {
            service_id: subscription.service_id.to_string(),
            plan: subscription.plan.clone(),
            price: format!("{:.2}", subscription.price),
            currency: subscription.currency.clone(),
            billing_cycle: subscription.cycle().as_str().to_owned(),
            status: subscription.status.as_str().to_owned(),
            next_billing_date: subscription
                .next_billing_date
                .as_deref()
                .and_then(parse_date)
                .map(iso_date)
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.parsed_service_id().is_none() {
            add(&mut errors, "service_id", "Service is required");
        }
        if blank(&self.plan) {
            add(&mut errors, "plan", "Plan is required");
        }
        if self.parsed_price().is_none() {
            add(&mut errors, "price", "Price must be greater than 0");
        }
        if BillingCycle::parse(&self.billing_cycle).is_none() {
            add(&mut errors, "billing_cycle", "Billing cycle is required");
        }
        if SubscriptionStatus::parse(&self.status).is_none() {
            add(&mut errors, "status", "Status is required");
        }
        if blank(&self.next_billing_date) {
            add(&mut errors, "next_billing_date", "Next billing date is required");
        } else if self.parsed_date().is_none() {
            add(&mut errors, "next_billing_date", "Next billing date must be a valid date");
        }
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_input(&self) -> Result<SubscriptionInput, FieldErrors> {
        let errors = self.validate();
        let (Some(service_id), Some(price), Some(billing_cycle), Some(status), Some(date)) = (
            self.parsed_service_id(),
            self.parsed_price(),
            BillingCycle::parse(&self.billing_cycle),
            SubscriptionStatus::parse(&self.status),
            self.parsed_date(),
        ) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        let currency = self.currency.trim().to_ascii_uppercase();
        Ok(SubscriptionInput {
            service_id,
            plan: self.plan.trim().to_owned(),
            price,
            currency: if currency.is_empty() { DEFAULT_CURRENCY.to_owned() } else { currency },
            billing_cycle,
            status,
            next_billing_date: iso_date(date),
        })
    }

    fn parsed_service_id(&self) -> Option<i64> {
        self.service_id.trim().parse::<i64>().ok().filter(|id| *id > 0)
    }

    fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0)
    }

    /// Exactly `YYYY-MM-DD`, as a date input produces.
    fn parsed_date(&self) -> Option<time::Date> {
        let raw = self.next_billing_date.trim();
        if raw.len() == 10 { parse_date(raw) } else { None }
    }
}

// =============================================================================
// ACCOUNT
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.current_password.is_empty() {
            add(&mut errors, "current_password", "Current password is required");
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            add(
                &mut errors,
                "new_password",
                &format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        if self.new_password != self.confirm_password {
            add(&mut errors, "confirm_password", "Passwords do not match");
        }
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_change(&self) -> Result<PasswordChange, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(PasswordChange {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
            new_password_confirmation: self.confirm_password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

impl ProfileForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if blank(&self.name) {
            add(&mut errors, "name", "Name is required");
        }
        if blank(&self.email) {
            add(&mut errors, "email", "Email is required");
        } else if !is_valid_email(&self.email) {
            add(&mut errors, "email", "Please enter a valid email address");
        }
        errors
    }

    /// # Errors
    ///
    /// Returns the field errors when the form is invalid.
    pub fn to_update(&self) -> Result<ProfileUpdate, FieldErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ProfileUpdate { name: self.name.trim().to_owned(), email: self.email.trim().to_owned() })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = ProfileForm { name: self.name.clone(), email: self.email.clone() }.validate();
        if self.password.is_empty() {
            add(&mut errors, "password", "Password is required");
        }
        if self.password != self.password_confirmation {
            add(&mut errors, "password_confirmation", "Passwords do not match");
        }
        errors
    }
}

/// Both login fields must be filled before the request is sent.
#[must_use]
pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if blank(email) {
        add(&mut errors, "email", "Email is required");
    }
    if password.is_empty() {
        add(&mut errors, "password", "Password is required");
    }
    errors
}
