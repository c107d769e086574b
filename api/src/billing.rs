//! Billing cycles: parsing, display, inference and monthly normalization.
//!
//! Older subscription records arrive without a `billing_cycle`; for those the
//! cycle is inferred from the gap between the creation date and the next
//! billing date, falling back to monthly.

#[cfg(test)]
#[path = "billing_test.rs"]
mod billing_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::{days_between, parse_date};
use crate::types::Subscription;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingCycle {
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl BillingCycle {
    pub const ALL: [Self; 4] = [Self::Monthly, Self::Quarterly, Self::SemiAnnual, Self::Annual];

    /// Parse a wire or form value; case-insensitive, accepts `yearly`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "semi-annual" | "semiannual" | "semi_annual" => Some(Self::SemiAnnual),
            "annual" | "yearly" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::SemiAnnual => "semi-annual",
            Self::Annual => "annual",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::SemiAnnual => "Semi-Annual",
            Self::Annual => "Annual",
        }
    }

    #[must_use]
    pub fn months(self) -> u8 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::SemiAnnual => 6,
            Self::Annual => 12,
        }
    }

    /// Infer a cycle from the start and next-billing dates.
    ///
    /// Day gaps of 360-370 are annual, 175-185 semi-annual, 85-95 quarterly;
    /// anything else, including missing or unreadable dates, is monthly.
    #[must_use]
    pub fn infer(start: Option<&str>, next_billing: Option<&str>) -> Self {
        let (Some(start), Some(next)) = (start.and_then(parse_date), next_billing.and_then(parse_date)) else {
            return Self::Monthly;
        };
        match days_between(start, next) {
            360..=370 => Self::Annual,
            175..=185 => Self::SemiAnnual,
            85..=95 => Self::Quarterly,
            _ => Self::Monthly,
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for BillingCycle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown billing cycle {raw:?}")))
    }
}

/// Display text for an optional raw cycle value, defaulting to Monthly.
///
/// Unknown values are shown capitalized rather than hidden.
#[must_use]
pub fn cycle_display_text(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return BillingCycle::Monthly.label().to_owned();
    };
    if let Some(cycle) = BillingCycle::parse(raw) {
        return cycle.label().to_owned();
    }
    let mut chars = raw.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect::<String>())
        .unwrap_or_default()
}

/// Price spread evenly over the months of its cycle.
#[must_use]
pub fn monthly_equivalent(price: f64, cycle: BillingCycle) -> f64 {
    price / f64::from(cycle.months())
}

/// Fill in a missing cycle from the record's dates.
pub fn ensure_billing_cycle(subscription: &mut Subscription) {
    if subscription.billing_cycle.is_none() {
        subscription.billing_cycle = Some(BillingCycle::infer(
            subscription.created_at.as_deref(),
            subscription.next_billing_date.as_deref(),
        ));
    }
}

/// [`ensure_billing_cycle`] over a whole list.
#[must_use]
pub fn with_billing_cycles(mut subscriptions: Vec<Subscription>) -> Vec<Subscription> {
    subscriptions.iter_mut().for_each(ensure_billing_cycle);
    subscriptions
}
