//! One service with the subscriptions attached to it.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use techsubs_api::format::{format_currency, format_date_str};
use techsubs_api::types::{Service, Subscription};
use techsubs_api::{ApiClient, ApiError};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::status_badge::StatusBadge;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::mounted::Mounted;
use crate::util::navigation::install_pending_navigation;

async fn load(api: &ApiClient, id: i64) -> Result<(Service, Vec<Subscription>), ApiError> {
    let service = api.service(id).await?;
    let mut subscriptions = api.list_subscriptions().await?;
    subscriptions.retain(|sub| sub.service_id == id);
    Ok((service, subscriptions))
}

#[component]
pub fn ServiceDetailPage() -> impl IntoView {
    let api = expect_context::<AppSession>().api();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let params = use_params_map();
    let mounted = Mounted::track();
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending, use_navigate());

    let id = params.read_untracked().get("id").and_then(|raw| raw.parse::<i64>().ok()).unwrap_or_default();
    let loaded = RwSignal::new(None::<(Service, Vec<Subscription>)>);
    let error = RwSignal::new(None::<String>);
    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);

    {
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = load(&api, id).await;
            if !mounted.is_alive() {
                return;
            }
            match result {
                Ok(data) => loaded.set(Some(data)),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    }

    let on_cancel = Callback::new(move |()| confirming.set(false));
    let on_confirm = Callback::new(move |()| {
        deleting.set(true);
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.delete_service(id).await;
            if !mounted.is_alive() {
                return;
            }
            deleting.set(false);
            confirming.set(false);
            match result {
                Ok(message) => {
                    notices.update(|n| n.success(message.unwrap_or_else(|| "Service deleted".to_owned())));
                    pending.set(Some("/services".to_owned()));
                }
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    view! {
        <div class="service-detail-page">
            <A href="/services" attr:class="back-link">"← Services"</A>
            <Show when=move || error.get().is_some()>
                <p class="page-error" role="alert">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || {
                loaded
                    .get()
                    .map(|(service, subscriptions)| {
                        view! { <ServiceDetail service=service subscriptions=subscriptions confirming=confirming/> }
                    })
            }}
            <Show when=move || loaded.get().is_none() && error.get().is_none()>
                <p class="page-status">"Loading service..."</p>
            </Show>
            <Show when=move || confirming.get()>
                <ConfirmDialog
                    title="Delete service".to_owned()
                    message="Delete this service and stop tracking it?".to_owned()
                    busy=deleting
                    on_confirm=on_confirm
                    on_cancel=on_cancel
                />
            </Show>
        </div>
    }
}

#[component]
fn ServiceDetail(service: Service, subscriptions: Vec<Subscription>, confirming: RwSignal<bool>) -> impl IntoView {
    let edit = format!("/services/{}/edit", service.id);
    let new_subscription = "/subscriptions/new".to_owned();
    let website = service.website_url.clone().filter(|url| !url.trim().is_empty());
    let description = service.description.clone().filter(|d| !d.trim().is_empty());
    let added = format_date_str(service.created_at.as_deref(), "Unknown");
    let empty = subscriptions.is_empty();

    view! {
        <header class="page-header">
            <h1>{service.name.clone()}</h1>
            <div class="page-header__actions">
                <A href=edit attr:class="btn">"Edit"</A>
                <button class="btn btn--danger" on:click=move |_| confirming.set(true)>
                    "Delete"
                </button>
            </div>
        </header>
        <dl class="detail-list">
            <dt>"Category"</dt>
            <dd>{service.category.clone()}</dd>
            <dt>"Website"</dt>
            <dd>
                {match website {
                    Some(url) => view! { <a href=url.clone() target="_blank" rel="noopener noreferrer">{url.clone()}</a> }.into_any(),
                    None => "N/A".into_any(),
                }}
            </dd>
            <dt>"Description"</dt>
            <dd>{description.unwrap_or_else(|| "N/A".to_owned())}</dd>
            <dt>"Added"</dt>
            <dd>{added}</dd>
        </dl>
        <section class="panel">
            <header class="panel__header">
                <h2>"Subscriptions"</h2>
                <A href=new_subscription attr:class="btn btn--small">"+ Add"</A>
            </header>
            <Show when=move || !empty fallback=|| view! { <p class="panel__empty">"No subscriptions for this service."</p> }>
                <ul class="plain-list">
                    {subscriptions
                        .clone()
                        .into_iter()
                        .map(|sub| {
                            let href = format!("/subscriptions/{}", sub.id);
                            let price = format_currency(sub.price, &sub.currency);
                            view! {
                                <li>
                                    <A href=href>{sub.plan.clone()}</A>
                                    <span>{price}</span>
                                    <StatusBadge status=sub.status/>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
        </section>
    }
}
