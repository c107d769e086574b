//! Reports: filter subscriptions, summarize them, export CSV or XLS.
//!
//! DESIGN
//! ======
//! Data is fetched once; filtering, totals and export all run locally on
//! the loaded rows. The filter draft lives only as long as the page, so every
//! visit starts unfiltered.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use leptos::prelude::*;
use techsubs_api::dates::parse_date;
use techsubs_api::format::{format_currency, format_date_str};
use techsubs_api::reports::{
    ExportFormat, ReportFilters, export, export_filename, service_names, summarize, with_service_names,
};
use techsubs_api::types::{Subscription, SubscriptionStatus};

use crate::components::status_badge::StatusBadge;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::clock::today;
use crate::util::download::save_text;
use crate::util::forms::non_blank;
use crate::util::mounted::Mounted;

/// Filter inputs exactly as typed; blank means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub date_from: String,
    pub date_to: String,
    pub service: String,
    pub status: String,
}

impl ReportDraft {
    /// Unreadable dates and unknown statuses are ignored rather than
    /// filtering everything out.
    pub fn to_filters(&self) -> ReportFilters {
        ReportFilters {
            date_from: parse_date(&self.date_from),
            date_to: parse_date(&self.date_to),
            service: non_blank(&self.service),
            status: SubscriptionStatus::parse(&self.status),
        }
    }
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let api = expect_context::<AppSession>().api();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let mounted = Mounted::track();

    let rows = RwSignal::new(Vec::<Subscription>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let draft = RwSignal::new(ReportDraft::default());

    leptos::task::spawn_local(async move {
        let listed = api.list_subscriptions().await;
        let services = api.list_services().await.unwrap_or_default();
        if !mounted.is_alive() {
            return;
        }
        match listed {
            Ok(items) => rows.set(with_service_names(items, &services)),
            Err(e) => error.set(Some(e.user_message())),
        }
        loading.set(false);
    });

    let filtered = Memo::new(move |_| {
        let filters = draft.with(ReportDraft::to_filters);
        rows.with(|all| filters.apply(all).into_iter().cloned().collect::<Vec<_>>())
    });
    let names = Memo::new(move |_| rows.with(|all| service_names(all)));

    let on_export = move |format: ExportFormat| {
        let body = filtered.with_untracked(|visible| export(&visible.iter().collect::<Vec<_>>(), format));
        let filename = export_filename(format, today());
        match save_text(&filename, format.mime_type(), &body) {
            Ok(()) => notices.update(|n| n.success(format!("Exported {filename}"))),
            Err(e) => {
                leptos::logging::warn!("report export failed: {e}");
                notices.update(|n| n.error("Export failed. Please try again."));
            }
        }
    };

    view! {
        <div class="reports-page">
            <header class="page-header">
                <h1>"Reports"</h1>
                <div class="page-header__actions">
                    <button
                        class="btn"
                        disabled=move || filtered.with(Vec::is_empty)
                        on:click=move |_| on_export(ExportFormat::Csv)
                    >
                        "Export CSV"
                    </button>
                    <button
                        class="btn"
                        disabled=move || filtered.with(Vec::is_empty)
                        on:click=move |_| on_export(ExportFormat::Xls)
                    >
                        "Export Excel"
                    </button>
                </div>
            </header>
            <form class="filter-bar" on:submit=|ev: leptos::ev::SubmitEvent| ev.prevent_default()>
                <label class="field">
                    <span class="field__label">"From"</span>
                    <input
                        class="field__input"
                        type="date"
                        prop:value=move || draft.with(|d| d.date_from.clone())
                        on:input=move |ev| draft.update(|d| d.date_from = event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field__label">"To"</span>
                    <input
                        class="field__input"
                        type="date"
                        prop:value=move || draft.with(|d| d.date_to.clone())
                        on:input=move |ev| draft.update(|d| d.date_to = event_target_value(&ev))
                    />
                </label>
                <label class="field">
                    <span class="field__label">"Service"</span>
                    <select class="field__input" on:change=move |ev| draft.update(|d| d.service = event_target_value(&ev))>
                        <option value="" selected=move || draft.with(|d| d.service.is_empty())>"All services"</option>
                        {move || {
                            names
                                .get()
                                .into_iter()
                                .map(|name| {
                                    let current = name.clone();
                                    view! {
                                        <option
                                            value=name.clone()
                                            selected=move || draft.with(|d| d.service == current)
                                        >
                                            {name.clone()}
                                        </option>
                                    }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <label class="field">
                    <span class="field__label">"Status"</span>
                    <select class="field__input" on:change=move |ev| draft.update(|d| d.status = event_target_value(&ev))>
                        <option value="" selected=move || draft.with(|d| d.status.is_empty())>"All statuses"</option>
                        {SubscriptionStatus::ALL
                            .into_iter()
                            .map(|status| {
                                view! {
                                    <option
                                        value=status.as_str()
                                        selected=move || draft.with(|d| d.status == status.as_str())
                                    >
                                        {status.label()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
                <button class="btn" type="button" on:click=move |_| draft.set(ReportDraft::default())>
                    "Clear filters"
                </button>
            </form>
            <Show when=move || error.get().is_some()>
                <p class="page-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading report..."</p> }>
                <div class="stat-grid">
                    {move || {
                        let summary = filtered.with(|visible| summarize(&visible.iter().collect::<Vec<_>>()));
                        view! {
                            <div class="stat-card">
                                <span class="stat-card__label">"Subscriptions"</span>
                                <span class="stat-card__value">{summary.count}</span>
                            </div>
                            <div class="stat-card">
                                <span class="stat-card__label">"Total expenses"</span>
                                <span class="stat-card__value">
                                    {format_currency(summary.total_expenses, &summary.currency)}
                                </span>
                            </div>
                        }
                    }}
                </div>
                <Show
                    when=move || !filtered.with(Vec::is_empty)
                    fallback=|| view! { <p class="panel__empty">"No subscriptions match these filters."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Service"</th>
                                <th>"Plan"</th>
                                <th>"Price"</th>
                                <th>"Status"</th>
                                <th>"Next billing"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                filtered
                                    .get()
                                    .into_iter()
                                    .map(|sub| {
                                        view! {
                                            <tr>
                                                <td>{sub.service_name.clone().unwrap_or_else(|| "N/A".to_owned())}</td>
                                                <td>{sub.plan.clone()}</td>
                                                <td>{format_currency(sub.price, &sub.currency)}</td>
                                                <td>
                                                    <StatusBadge status=sub.status/>
                                                </td>
                                                <td>{format_date_str(sub.next_billing_date.as_deref(), "N/A")}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </Show>
        </div>
    }
}
