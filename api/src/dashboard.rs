//! Dashboard aggregates computed from the fetched lists.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::collections::BTreeMap;

use time::Date;

use crate::billing::monthly_equivalent;
use crate::dates::{days_until, parse_date};
use crate::types::{Service, Subscription};

/// Default look-ahead for upcoming renewals.
pub const DEFAULT_HORIZON_DAYS: i64 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct UpcomingRenewal {
    pub subscription_id: i64,
    pub service: String,
    pub plan: String,
    pub price: f64,
    pub currency: String,
    pub date: Date,
    pub days_until: i64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSummary {
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    pub total_services: usize,
    /// Monthly-equivalent spend of active subscriptions, keyed by currency code.
    pub monthly_spend: BTreeMap<String, f64>,
    /// Active renewals within the horizon, soonest first.
    pub upcoming: Vec<UpcomingRenewal>,
}

impl DashboardSummary {
    /// Spend for one currency, zero when absent.
    #[must_use]
    pub fn spend_in(&self, currency: &str) -> f64 {
        self.monthly_spend.get(currency).copied().unwrap_or_default()
    }
}

#[must_use]
pub fn summarize(
    subscriptions: &[Subscription],
    services: &[Service],
    today: Date,
    horizon_days: i64,
) -> DashboardSummary {
    let active: Vec<&Subscription> = subscriptions.iter().filter(|sub| sub.is_active()).collect();

    let mut monthly_spend = BTreeMap::new();
    for sub in &active {
        *monthly_spend.entry(sub.currency.to_ascii_uppercase()).or_insert(0.0) +=
            monthly_equivalent(sub.price, sub.cycle());
    }

    let mut upcoming: Vec<UpcomingRenewal> = active
        .iter()
        .filter_map(|sub| {
            let date = sub.next_billing_date.as_deref().and_then(parse_date)?;
            let days = days_until(date, today);
            (0..=horizon_days).contains(&days).then(|| UpcomingRenewal {
                subscription_id: sub.id,
                service: sub.service_label(services),
                plan: sub.plan.clone(),
                price: sub.price,
                currency: sub.currency.clone(),
                date,
                days_until: days,
            })
        })
        .collect();
    upcoming.sort_by_key(|renewal| (renewal.date, renewal.subscription_id));

    DashboardSummary {
        total_subscriptions: subscriptions.len(),
        active_subscriptions: active.len(),
        total_services: services.len(),
        monthly_spend,
        upcoming,
    }
}
