//! Subscription list with status filter and row actions.
//!
//! Cancel and reactivate update the row in place from the server's answer;
//! delete asks for confirmation first.

#[cfg(test)]
#[path = "subscriptions_test.rs"]
mod subscriptions_test;

use leptos::prelude::*;
use leptos_router::components::A;
use techsubs_api::dates::{parse_date, relative_days};
use techsubs_api::format::{format_currency, format_date};
use techsubs_api::types::{Service, Subscription, SubscriptionStatus};
use techsubs_api::{ApiClient, ApiError};
use time::Date;

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::status_badge::StatusBadge;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::clock::today;
use crate::util::mounted::Mounted;

/// Rows with `status`, or all rows for `None`.
pub fn filter_by_status(subscriptions: &[Subscription], status: Option<SubscriptionStatus>) -> Vec<Subscription> {
    subscriptions.iter().filter(|sub| status.is_none_or(|s| sub.status == s)).cloned().collect()
}

/// `Mar 4, 2025 (in 3 days)`, or `N/A` without a readable date.
pub fn next_billing_label(subscription: &Subscription, today: Date) -> String {
    subscription
        .next_billing_date
        .as_deref()
        .and_then(parse_date)
        .map_or_else(|| "N/A".to_owned(), |date| format!("{} ({})", format_date(date), relative_days(date, today)))
}

/// Replace the row with the same id.
pub fn replace_row(rows: &mut [Subscription], updated: Subscription) {
    if let Some(row) = rows.iter_mut().find(|row| row.id == updated.id) {
        *row = updated;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowAction {
    Cancel,
    Reactivate,
}

async fn apply(api: &ApiClient, id: i64, action: RowAction) -> Result<Subscription, ApiError> {
    match action {
        RowAction::Cancel => api.cancel_subscription(id).await,
        RowAction::Reactivate => api.reactivate_subscription(id).await,
    }
}

#[component]
pub fn SubscriptionsPage() -> impl IntoView {
    let api = expect_context::<AppSession>().api();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let mounted = Mounted::track();
    let today = today();

    let subscriptions = RwSignal::new(Vec::<Subscription>::new());
    let services = RwSignal::new(Vec::<Service>::new());
    let status_filter = RwSignal::new(None::<SubscriptionStatus>);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let pending_delete = RwSignal::new(None::<Subscription>);
    let deleting = RwSignal::new(false);

    {
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let listed = api.list_subscriptions().await;
            // Labels fall back to "Service #id" when services fail to load.
            let known = api.list_services().await.unwrap_or_default();
            if !mounted.is_alive() {
                return;
            }
            match listed {
                Ok(items) => subscriptions.set(items),
                Err(e) => error.set(Some(e.user_message())),
            }
            services.set(known);
            loading.set(false);
        });
    }

    let on_action = {
        let api = api.clone();
        let mounted = mounted.clone();
        Callback::new(move |(id, action): (i64, RowAction)| {
            let api = api.clone();
            let mounted = mounted.clone();
            leptos::task::spawn_local(async move {
                let result = apply(&api, id, action).await;
                if !mounted.is_alive() {
                    return;
                }
                match result {
                    Ok(updated) => {
                        let verb = if action == RowAction::Cancel { "canceled" } else { "reactivated" };
                        notices.update(|n| n.success(format!("Subscription {verb}")));
                        subscriptions.update(|rows| replace_row(rows, updated));
                    }
                    Err(e) => notices.update(|n| n.error(e.user_message())),
                }
            });
        })
    };

    let on_cancel_delete = Callback::new(move |()| pending_delete.set(None));
    let on_confirm_delete = Callback::new(move |()| {
        let Some(target) = pending_delete.get_untracked() else {
            return;
        };
        deleting.set(true);
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.delete_subscription(target.id).await;
            if !mounted.is_alive() {
                return;
            }
            match result {
                Ok(message) => {
                    subscriptions.update(|rows| rows.retain(|row| row.id != target.id));
                    notices.update(|n| n.success(message.unwrap_or_else(|| "Subscription deleted".to_owned())));
                }
                Err(e) => notices.update(|n| n.error(e.user_message())),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    });

    let visible = move || filter_by_status(&subscriptions.get(), status_filter.get());

    view! {
        <div class="subscriptions-page">
            <header class="page-header">
                <h1>"Subscriptions"</h1>
                <A href="/subscriptions/new" attr:class="btn btn--primary">"+ New subscription"</A>
            </header>
            <div class="toolbar">
                <label class="field field--inline">
                    <span class="field__label">"Status"</span>
                    <select
                        class="field__input"
                        on:change=move |ev| status_filter.set(SubscriptionStatus::parse(&event_target_value(&ev)))
                    >
                        <option value="" selected=move || status_filter.get().is_none()>"All"</option>
                        {SubscriptionStatus::ALL
                            .into_iter()
                            .map(|status| {
                                view! {
                                    <option value=status.as_str() selected=move || status_filter.get() == Some(status)>
                                        {status.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
            </div>
            <Show when=move || error.get().is_some()>
                <p class="page-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading subscriptions..."</p> }>
                <Show
                    when=move || !visible().is_empty()
                    fallback=|| view! { <p class="panel__empty">"No subscriptions match."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Service"</th>
                                <th>"Plan"</th>
                                <th>"Price"</th>
                                <th>"Cycle"</th>
                                <th>"Next billing"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let known = services.get();
                                visible()
                                    .into_iter()
                                    .map(|sub| {
                                        let service = sub.service_label(&known);
                                        view! {
                                            <SubscriptionRow
                                                subscription=sub
                                                service=service
                                                today=today
                                                on_action=on_action
                                                pending_delete=pending_delete
                                            />
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </Show>
            <Show when=move || pending_delete.get().is_some()>
                <ConfirmDialog
                    title="Delete subscription".to_owned()
                    message="This removes the subscription and its billing history.".to_owned()
                    busy=deleting
                    on_confirm=on_confirm_delete
                    on_cancel=on_cancel_delete
                />
            </Show>
        </div>
    }
}

#[component]
fn SubscriptionRow(
    subscription: Subscription,
    service: String,
    today: Date,
    on_action: Callback<(i64, RowAction)>,
    pending_delete: RwSignal<Option<Subscription>>,
) -> impl IntoView {
    let id = subscription.id;
    let detail = format!("/subscriptions/{id}");
    let edit = format!("/subscriptions/{id}/edit");
    let price = format_currency(subscription.price, &subscription.currency);
    let cycle = subscription.cycle().label();
    let next = next_billing_label(&subscription, today);
    let status = subscription.status;
    let plan = subscription.plan.clone();
    let toggle = match status {
        SubscriptionStatus::Canceled => (RowAction::Reactivate, "Reactivate"),
        SubscriptionStatus::Active | SubscriptionStatus::Paused => (RowAction::Cancel, "Cancel"),
    };

    view! {
        <tr>
            <td>
                <A href=detail>{service}</A>
            </td>
            <td>{plan}</td>
            <td>{price}</td>
            <td>{cycle}</td>
            <td>{next}</td>
            <td>
                <StatusBadge status=status/>
            </td>
            <td class="data-table__actions">
                <A href=edit attr:class="btn btn--small">"Edit"</A>
                <button class="btn btn--small" on:click=move |_| on_action.run((id, toggle.0))>
                    {toggle.1}
                </button>
                <button
                    class="btn btn--small btn--danger"
                    on:click=move |_| pending_delete.set(Some(subscription.clone()))
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
