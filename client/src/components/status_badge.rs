//! Colored pill for a subscription status.

#[cfg(test)]
#[path = "status_badge_test.rs"]
mod status_badge_test;

use leptos::prelude::*;
use techsubs_api::types::SubscriptionStatus;

pub fn badge_class(status: SubscriptionStatus) -> &'static str {
    match status {
        SubscriptionStatus::Active => "badge badge--active",
        SubscriptionStatus::Paused => "badge badge--paused",
        SubscriptionStatus::Canceled => "badge badge--canceled",
    }
}

#[component]
pub fn StatusBadge(status: SubscriptionStatus) -> impl IntoView {
    view! { <span class=badge_class(status)>{status.label()}</span> }
}
