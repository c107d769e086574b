//! Dashboard: subscription counts, monthly spend, upcoming renewals.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated home view. Loads services and subscriptions once on
//! mount and derives everything else locally through the core's summary.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::components::A;
use techsubs_api::dashboard::{DEFAULT_HORIZON_DAYS, DashboardSummary, UpcomingRenewal, summarize};
use techsubs_api::dates::relative_days;
use techsubs_api::format::{format_currency, format_date};
use techsubs_api::types::DEFAULT_CURRENCY;
use techsubs_api::{ApiClient, ApiError};
use time::Date;

use crate::state::session::{AppSession, display_name};
use crate::util::clock::today;
use crate::util::mounted::Mounted;

/// One line per currency, e.g. `$42.50`. A user without active
/// subscriptions sees a zero in the default currency.
pub fn spend_lines(summary: &DashboardSummary) -> Vec<String> {
    if summary.monthly_spend.is_empty() {
        return vec![format_currency(0.0, DEFAULT_CURRENCY)];
    }
    summary
        .monthly_spend
        .iter()
        .map(|(currency, amount)| format_currency(*amount, currency))
        .collect()
}

/// "Netflix (Premium): $15.99, in 3 days"
pub fn renewal_line(renewal: &UpcomingRenewal, today: Date) -> String {
    format!(
        "{} ({}): {}, {}",
        renewal.service,
        renewal.plan,
        format_currency(renewal.price, &renewal.currency),
        relative_days(renewal.date, today)
    )
}

async fn load_summary(api: &ApiClient, today: Date) -> Result<DashboardSummary, ApiError> {
    let services = api.list_services().await?;
    let subscriptions = api.list_subscriptions().await?;
    Ok(summarize(&subscriptions, &services, today, DEFAULT_HORIZON_DAYS))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = expect_context::<AppSession>();
    let session = app.session;
    let api = app.api();
    let mounted = Mounted::track();
    let today = today();

    let summary = RwSignal::new(None::<DashboardSummary>);
    let error = RwSignal::new(None::<String>);

    leptos::task::spawn_local(async move {
        let result = load_summary(&api, today).await;
        if !mounted.is_alive() {
            return;
        }
        match result {
            Ok(loaded) => summary.set(Some(loaded)),
            Err(e) => {
                leptos::logging::warn!("dashboard load failed: {e}");
                error.set(Some(e.user_message()));
            }
        }
    });

    view! {
        <div class="dashboard-page">
            <header class="page-header">
                <h1>{move || format!("Welcome back, {}", display_name(&session.get()))}</h1>
                <A href="/subscriptions/new" attr:class="btn btn--primary">"+ Add subscription"</A>
            </header>
            <Show when=move || error.get().is_some()>
                <p class="page-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || match summary.get() {
                None if error.get().is_none() => view! { <p class="page-status">"Loading dashboard..."</p> }.into_any(),
                None => ().into_any(),
                Some(summary) => view! { <SummaryView summary=summary today=today/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn SummaryView(summary: DashboardSummary, today: Date) -> impl IntoView {
    let spend = spend_lines(&summary);
    let upcoming = summary.upcoming.clone();
    let no_upcoming = upcoming.is_empty();

    view! {
        <div class="stat-grid">
            <div class="stat-card">
                <span class="stat-card__label">"Subscriptions"</span>
                <span class="stat-card__value">{summary.total_subscriptions}</span>
            </div>
            <div class="stat-card">
                <span class="stat-card__label">"Active"</span>
                <span class="stat-card__value">{summary.active_subscriptions}</span>
            </div>
            <div class="stat-card">
                <span class="stat-card__label">"Services"</span>
                <span class="stat-card__value">{summary.total_services}</span>
            </div>
            <div class="stat-card">
                <span class="stat-card__label">"Monthly spend"</span>
                {spend.into_iter().map(|line| view! { <span class="stat-card__value">{line}</span> }).collect_view()}
            </div>
        </div>
        <section class="panel">
            <h2>{format!("Renewals in the next {DEFAULT_HORIZON_DAYS} days")}</h2>
            <Show when=move || !no_upcoming fallback=|| view! { <p class="panel__empty">"Nothing renews soon."</p> }>
                <ul class="renewal-list">
                    {upcoming
                        .clone()
                        .into_iter()
                        .map(|renewal| {
                            let href = format!("/subscriptions/{}", renewal.subscription_id);
                            let date = format_date(renewal.date);
                            let line = renewal_line(&renewal, today);
                            view! {
                                <li class="renewal-list__item">
                                    <A href=href>{line}</A>
                                    <span class="renewal-list__date">{date}</span>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
        </section>
    }
}
