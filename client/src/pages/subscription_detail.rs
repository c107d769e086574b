//! One subscription: cost breakdown, renewal timing, and lifecycle actions.

#[cfg(test)]
#[path = "subscription_detail_test.rs"]
mod subscription_detail_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use techsubs_api::billing::monthly_equivalent;
use techsubs_api::dates::{days_until, is_past, parse_date};
use techsubs_api::format::{format_currency, format_date, format_date_str};
use techsubs_api::types::{Service, Subscription, SubscriptionStatus};
use time::Date;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::status_badge::StatusBadge;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::clock::today;
use crate::util::mounted::Mounted;
use crate::util::navigation::install_pending_navigation;

/// Renewal status line: "Renews Mar 4, 2025 (3 days left)", "Renews today",
/// "Expired on ...", or "No billing date".
pub fn renewal_status(subscription: &Subscription, today: Date) -> String {
    let Some(date) = subscription.next_billing_date.as_deref().and_then(parse_date) else {
        return "No billing date".to_owned();
    };
    if is_past(date, today) {
        return format!("Expired on {}", format_date(date));
    }
    match days_until(date, today) {
        0 => "Renews today".to_owned(),
        1 => format!("Renews {} (1 day left)", format_date(date)),
        n => format!("Renews {} ({n} days left)", format_date(date)),
    }
}

#[component]
pub fn SubscriptionDetailPage() -> impl IntoView {
    let api = expect_context::<AppSession>().api();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let params = use_params_map();
    let mounted = Mounted::track();
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending, use_navigate());
    let today = today();

    let id = params.read_untracked().get("id").and_then(|raw| raw.parse::<i64>().ok()).unwrap_or_default();
    let subscription = RwSignal::new(None::<Subscription>);
    let services = RwSignal::new(Vec::<Service>::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let confirming = RwSignal::new(false);

    {
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.subscription(id).await;
            let known = api.list_services().await.unwrap_or_default();
            if !mounted.is_alive() {
                return;
            }
            match result {
                Ok(found) => subscription.set(Some(found)),
                Err(e) => error.set(Some(e.user_message())),
            }
            services.set(known);
        });
    }

    let on_toggle = {
        let api = api.clone();
        let mounted = mounted.clone();
        Callback::new(move |()| {
            let Some(current) = subscription.get_untracked() else {
                return;
            };
            busy.set(true);
            let api = api.clone();
            let mounted = mounted.clone();
            leptos::task::spawn_local(async move {
                let result = if current.status == SubscriptionStatus::Canceled {
                    api.reactivate_subscription(current.id).await
                } else {
                    api.cancel_subscription(current.id).await
                };
                if !mounted.is_alive() {
                    return;
                }
                busy.set(false);
                match result {
                    Ok(updated) => {
                        notices.update(|n| n.success(format!("Subscription is now {}", updated.status.label())));
                        subscription.set(Some(updated));
                    }
                    Err(e) => error.set(Some(e.user_message())),
                }
            });
        })
    };

    let on_cancel_delete = Callback::new(move |()| confirming.set(false));
    let on_confirm_delete = Callback::new(move |()| {
        busy.set(true);
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.delete_subscription(id).await;
            if !mounted.is_alive() {
                return;
            }
            busy.set(false);
            confirming.set(false);
            match result {
                Ok(message) => {
                    notices.update(|n| n.success(message.unwrap_or_else(|| "Subscription deleted".to_owned())));
                    pending.set(Some("/subscriptions".to_owned()));
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    view! {
        <div class="subscription-detail-page">
            <A href="/subscriptions" attr:class="back-link">"← Subscriptions"</A>
            <Show when=move || error.get().is_some()>
                <p class="page-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                subscription
                    .get()
                    .map(|sub| {
                        let service = sub.service_label(&services.get());
                        let edit = format!("/subscriptions/{}/edit", sub.id);
                        let service_href = format!("/services/{}", sub.service_id);
                        let cycle = sub.cycle();
                        let price = format_currency(sub.price, &sub.currency);
                        let monthly = format_currency(monthly_equivalent(sub.price, cycle), &sub.currency);
                        let renewal = renewal_status(&sub, today);
                        let created = format_date_str(sub.created_at.as_deref(), "Unknown");
                        let toggle_label = if sub.status == SubscriptionStatus::Canceled { "Reactivate" } else { "Cancel" };
                        view! {
                            <header class="page-header">
                                <h1>{format!("{service} · {}", sub.plan)}</h1>
                                <StatusBadge status=sub.status/>
                            </header>
                            <dl class="detail-list">
                                <dt>"Service"</dt>
                                <dd>
                                    <A href=service_href>{service.clone()}</A>
                                </dd>
                                <dt>"Price"</dt>
                                <dd>{format!("{price} / {}", cycle.label())}</dd>
                                <dt>"Monthly equivalent"</dt>
                                <dd>{monthly}</dd>
                                <dt>"Next billing"</dt>
                                <dd>{renewal}</dd>
                                <dt>"Added"</dt>
                                <dd>{created}</dd>
                            </dl>
                            <div class="page-header__actions">
                                <A href=edit attr:class="btn">"Edit"</A>
                                <button class="btn" disabled=move || busy.get() on:click=move |_| on_toggle.run(())>
                                    {toggle_label}
                                </button>
                                <button class="btn btn--danger" disabled=move || busy.get() on:click=move |_| confirming.set(true)>
                                    "Delete"
                                </button>
                            </div>
                        }
                    })
            }}
            <Show when=move || subscription.get().is_none() && error.get().is_none()>
                <p class="page-status">"Loading subscription..."</p>
            </Show>
            <Show when=move || confirming.get()>
                <ConfirmDialog
                    title="Delete subscription".to_owned()
                    message="This removes the subscription permanently.".to_owned()
                    busy=busy
                    on_confirm=on_confirm_delete
                    on_cancel=on_cancel_delete
                />
            </Show>
        </div>
    }
}
