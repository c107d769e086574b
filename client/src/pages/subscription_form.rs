//! Create and edit form for a subscription.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use techsubs_api::FieldErrors;
use techsubs_api::billing::BillingCycle;
use techsubs_api::types::{Service, SubscriptionStatus};
use techsubs_api::validation::SubscriptionForm;

use crate::components::field_error::FieldError;
use crate::components::text_field::TextField;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::forms::submission_failure;
use crate::util::mounted::Mounted;
use crate::util::navigation::install_pending_navigation;

const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "BRL"];

#[component]
pub fn SubscriptionFormPage() -> impl IntoView {
    let api = expect_context::<AppSession>().api();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let params = use_params_map();
    let mounted = Mounted::track();
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending, use_navigate());

    let editing = params.read_untracked().get("id").and_then(|raw| raw.parse::<i64>().ok());
    let form = RwSignal::new(SubscriptionForm::default());
    let services = RwSignal::new(Vec::<Service>::new());
    let errors = RwSignal::new(FieldErrors::new());
    let banner = RwSignal::new(None::<String>);
    let ready = RwSignal::new(false);
    let busy = RwSignal::new(false);

    {
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let listed = api.list_services().await;
            let existing = match editing {
                Some(id) => Some(api.subscription(id).await),
                None => None,
            };
            if !mounted.is_alive() {
                return;
            }
            match listed {
                Ok(items) => services.set(items),
                Err(e) => banner.set(Some(e.user_message())),
            }
            match existing {
                Some(Ok(subscription)) => form.set(SubscriptionForm::edit(&subscription)),
                Some(Err(e)) => banner.set(Some(e.user_message())),
                None => {}
            }
            ready.set(true);
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        banner.set(None);
        let input = match form.get_untracked().to_input() {
            Ok(input) => input,
            Err(invalid) => {
                errors.set(invalid);
                return;
            }
        };
        errors.set(FieldErrors::new());
        busy.set(true);

        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = match editing {
                Some(id) => api.update_subscription(id, &input).await,
                None => api.create_subscription(&input).await,
            };
            if !mounted.is_alive() {
                return;
            }
            busy.set(false);
            match result {
                Ok(saved) => {
                    let verb = if editing.is_some() { "updated" } else { "added" };
                    notices.update(|n| n.success(format!("Subscription {verb}")));
                    pending.set(Some(format!("/subscriptions/{}", saved.id)));
                }
                Err(e) => {
                    let (message, fields) = submission_failure(&e);
                    banner.set(Some(message));
                    errors.set(fields);
                }
            }
        });
    };

    let title = if editing.is_some() { "Edit subscription" } else { "New subscription" };
    let cancel_href = editing.map_or_else(|| "/subscriptions".to_owned(), |id| format!("/subscriptions/{id}"));

    view! {
        <div class="form-page">
            <h1>{title}</h1>
            <Show when=move || banner.get().is_some()>
                <p class="page-error" role="alert">{move || banner.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || ready.get() fallback=|| view! { <p class="page-status">"Loading..."</p> }>
                <form class="form-card" on:submit=on_submit.clone() novalidate=true>
                    <label class="field">
                        <span class="field__label">"Service"</span>
                        <select
                            class="field__input"
                            on:change=move |ev| form.update(|f| f.service_id = event_target_value(&ev))
                        >
                            <option value="" selected=move || form.with(|f| f.service_id.is_empty())>
                                "Select a service"
                            </option>
                            {move || {
                                services
                                    .get()
                                    .into_iter()
                                    .map(|service| {
                                        let value = service.id.to_string();
                                        let selected_value = value.clone();
                                        view! {
                                            <option
                                                value=value
                                                selected=move || form.with(|f| f.service_id == selected_value)
                                            >
                                                {service.name}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
                        <FieldError errors=errors field="service_id"/>
                        <Show when=move || services.with(Vec::is_empty)>
                            <p class="field__hint">
                                "No services yet. "
                                <A href="/services/new">"Add one first."</A>
                            </p>
                        </Show>
                    </label>
                    <TextField
                        label="Plan"
                        field="plan"
                        placeholder="Premium, Pro, Team..."
                        value=Signal::derive(move || form.with(|f| f.plan.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.plan = v))
                        errors=errors
                    />
                    <TextField
                        label="Price"
                        field="price"
                        input_type="number"
                        placeholder="0.00"
                        value=Signal::derive(move || form.with(|f| f.price.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.price = v))
                        errors=errors
                    />
                    <label class="field">
                        <span class="field__label">"Currency"</span>
                        <select
                            class="field__input"
                            on:change=move |ev| form.update(|f| f.currency = event_target_value(&ev))
                        >
                            {CURRENCIES
                                .into_iter()
                                .map(|code| {
                                    view! {
                                        <option value=code selected=move || form.with(|f| f.currency == code)>
                                            {code}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <FieldError errors=errors field="currency"/>
                    </label>
                    <label class="field">
                        <span class="field__label">"Billing cycle"</span>
                        <select
                            class="field__input"
                            on:change=move |ev| form.update(|f| f.billing_cycle = event_target_value(&ev))
                        >
                            {BillingCycle::ALL
                                .into_iter()
                                .map(|cycle| {
                                    view! {
                                        <option
                                            value=cycle.as_str()
                                            selected=move || form.with(|f| f.billing_cycle == cycle.as_str())
                                        >
                                            {cycle.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <FieldError errors=errors field="billing_cycle"/>
                    </label>
                    <label class="field">
                        <span class="field__label">"Status"</span>
                        <select
                            class="field__input"
                            on:change=move |ev| form.update(|f| f.status = event_target_value(&ev))
                        >
                            {SubscriptionStatus::ALL
                                .into_iter()
                                .map(|status| {
                                    view! {
                                        <option
                                            value=status.as_str()
                                            selected=move || form.with(|f| f.status == status.as_str())
                                        >
                                            {status.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                        <FieldError errors=errors field="status"/>
                    </label>
                    <TextField
                        label="Next billing date"
                        field="next_billing_date"
                        input_type="date"
                        value=Signal::derive(move || form.with(|f| f.next_billing_date.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.next_billing_date = v))
                        errors=errors
                    />
                    <div class="form-card__actions">
                        <A href=cancel_href.clone() attr:class="btn">"Cancel"</A>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving..." } else { "Save subscription" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
