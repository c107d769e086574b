//! Wire schema for the TechSubs REST API.
//!
//! DESIGN
//! ======
//! Every response body is one envelope shape, `{success?, message?, data}`.
//! Payloads are read from `data` only; a body that does not match fails with
//! a decode error instead of being guessed at. Numeric fields tolerate the
//! server's habit of sending decimals and ids as strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::billing::BillingCycle;
use crate::error::FieldErrors;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Response envelope wrapping every payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope<T> {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Envelope without a payload, for calls answered with a message only.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a non-2xx response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, OneOrMany>,
}

/// A 422 entry is either a single message or a list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl ErrorBody {
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .map(|(field, messages)| {
                let messages = match messages {
                    OneOrMany::One(message) => vec![message.clone()],
                    OneOrMany::Many(messages) => messages.clone(),
                };
                (field.clone(), messages)
            })
            .filter(|(_, messages)| !messages.is_empty())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `data` of a successful login or registration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub remember: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password_confirmation: &'a str,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Create/update body for a service.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ServiceInput {
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    #[serde(alias = "cancelled")]
    Canceled,
}

impl SubscriptionStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Paused, Self::Canceled];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Canceled => "canceled",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Paused => "Paused",
            Self::Canceled => "Canceled",
        }
    }

    /// Parse a form or filter value; case-insensitive, accepts `cancelled`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "paused" => Some(Self::Paused),
            "canceled" | "cancelled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub service_id: i64,
    /// Denormalized service name some endpoints include.
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(alias = "plan_name")]
    pub plan: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Absent on older records; see [`crate::billing::ensure_billing_cycle`].
    #[serde(default, deserialize_with = "deserialize_optional_cycle")]
    pub billing_cycle: Option<BillingCycle>,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub next_billing_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Subscription {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Cycle used for cost math; monthly when still unknown.
    #[must_use]
    pub fn cycle(&self) -> BillingCycle {
        self.billing_cycle.unwrap_or_default()
    }

    /// Service label: the denormalized name, the matching service, or `Service #id`.
    #[must_use]
    pub fn service_label(&self, services: &[Service]) -> String {
        if let Some(name) = self.service_name.as_deref().filter(|name| !name.trim().is_empty()) {
            return name.to_owned();
        }
        services
            .iter()
            .find(|service| service.id == self.service_id)
            .map_or_else(|| format!("Service #{}", self.service_id), |service| service.name.clone())
    }
}

/// Create/update body for a subscription.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubscriptionInput {
    pub service_id: i64,
    pub plan: String,
    pub price: f64,
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub status: SubscriptionStatus,
    pub next_billing_date: String,
}

/// Partial subscription update; only set fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SubscriptionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<BillingCycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_billing_date: Option<String>,
}

impl SubscriptionPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Aggregate counters from the `/stats` endpoints; the server owns the keys.
pub type Stats = serde_json::Map<String, serde_json::Value>;

fn default_true() -> bool {
    true
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_owned()
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("id {number} is not an integer"))),
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("id {raw:?} is not an integer"))),
        other => Err(D::Error::custom(format!("expected id, got {other}"))),
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom("price out of range"))?,
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("price {raw:?} is not a number")))?,
        serde_json::Value::Null => 0.0,
        other => return Err(D::Error::custom(format!("expected price, got {other}"))),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(D::Error::custom("price is not finite"))
    }
}

fn deserialize_optional_cycle<'de, D>(deserializer: D) -> Result<Option<BillingCycle>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => BillingCycle::parse(raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unknown billing cycle {raw:?}"))),
    }
}
