//! Services list with stats and delete confirmation.

#[cfg(test)]
#[path = "services_test.rs"]
mod services_test;

use leptos::prelude::*;
use leptos_router::components::A;
use techsubs_api::types::{Service, Stats};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::mounted::Mounted;

/// `total_services` -> `Total services`.
pub fn humanize_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.trim().chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Scalar stats as label/value pairs in key order. Nested values are skipped.
pub fn stat_entries(stats: &Stats) -> Vec<(String, String)> {
    stats
        .iter()
        .filter_map(|(key, value)| {
            let rendered = match value {
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((humanize_key(key), rendered))
        })
        .collect()
}

#[component]
pub fn ServicesPage() -> impl IntoView {
    let api = expect_context::<AppSession>().api();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let mounted = Mounted::track();

    let services = RwSignal::new(Vec::<Service>::new());
    let stats = RwSignal::new(Vec::<(String, String)>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let pending_delete = RwSignal::new(None::<Service>);
    let deleting = RwSignal::new(false);

    {
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let listed = api.list_services().await;
            if !mounted.is_alive() {
                return;
            }
            match listed {
                Ok(items) => services.set(items),
                Err(e) => error.set(Some(e.user_message())),
            }
            loading.set(false);

            // Stats are decoration; a failure only hides the strip.
            if let Ok(raw) = api.service_stats().await {
                if mounted.is_alive() {
                    stats.set(stat_entries(&raw));
                }
            }
        });
    }

    let on_cancel = Callback::new(move |()| pending_delete.set(None));
    let on_confirm = Callback::new(move |()| {
        let Some(service) = pending_delete.get_untracked() else {
            return;
        };
        deleting.set(true);
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.delete_service(service.id).await;
            if !mounted.is_alive() {
                return;
            }
            match result {
                Ok(message) => {
                    services.update(|items| items.retain(|s| s.id != service.id));
                    notices.update(|n| n.success(message.unwrap_or_else(|| format!("{} deleted", service.name))));
                }
                Err(e) => notices.update(|n| n.error(e.user_message())),
            }
            deleting.set(false);
            pending_delete.set(None);
        });
    });

    view! {
        <div class="services-page">
            <header class="page-header">
                <h1>"Services"</h1>
                <A href="/services/new" attr:class="btn btn--primary">"+ New service"</A>
            </header>
            <Show when=move || !stats.get().is_empty()>
                <div class="stat-strip">
                    {move || {
                        stats
                            .get()
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <span class="stat-strip__item">
                                        <span class="stat-strip__label">{label}</span>
                                        <span class="stat-strip__value">{value}</span>
                                    </span>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="page-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p class="page-status">"Loading services..."</p> }>
                <Show
                    when=move || !services.get().is_empty()
                    fallback=|| view! { <p class="panel__empty">"No services yet. Add the first one."</p> }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Category"</th>
                                <th>"Website"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                services
                                    .get()
                                    .into_iter()
                                    .map(|service| view! { <ServiceRow service=service pending_delete=pending_delete/> })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </Show>
            <Show when=move || pending_delete.get().is_some()>
                <ConfirmDialog
                    title="Delete service".to_owned()
                    message=pending_delete
                        .get_untracked()
                        .map(|s| format!("Delete {} and stop tracking it?", s.name))
                        .unwrap_or_default()
                    busy=deleting
                    on_confirm=on_confirm
                    on_cancel=on_cancel
                />
            </Show>
        </div>
    }
}

#[component]
fn ServiceRow(service: Service, pending_delete: RwSignal<Option<Service>>) -> impl IntoView {
    let detail = format!("/services/{}", service.id);
    let edit = format!("/services/{}/edit", service.id);
    let website = service.website_url.clone().filter(|url| !url.trim().is_empty());
    let name = service.name.clone();
    let category = service.category.clone();

    view! {
        <tr>
            <td>
                <A href=detail>{name}</A>
            </td>
            <td>{category}</td>
            <td>
                {website.map(|url| {
                    view! { <a href=url.clone() target="_blank" rel="noopener noreferrer">{url.clone()}</a> }
                })}
            </td>
            <td class="data-table__actions">
                <A href=edit attr:class="btn btn--small">"Edit"</A>
                <button class="btn btn--small btn--danger" on:click=move |_| pending_delete.set(Some(service.clone()))>
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
