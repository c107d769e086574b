//! Create and edit form for a service.
//!
//! Mounted at `/services/new` and `/services/:id/edit`; the presence of the
//! `id` parameter selects edit mode, which prefills from the server first.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use techsubs_api::FieldErrors;
use techsubs_api::validation::{FormMode, ServiceForm};

use crate::components::text_field::TextField;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::forms::submission_failure;
use crate::util::mounted::Mounted;
use crate::util::navigation::install_pending_navigation;

#[component]
pub fn ServiceFormPage() -> impl IntoView {
    let api = expect_context::<AppSession>().api();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let params = use_params_map();
    let mounted = Mounted::track();
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending, use_navigate());

    let editing = params.read_untracked().get("id").and_then(|raw| raw.parse::<i64>().ok());
    let form = RwSignal::new(ServiceForm::create());
    let errors = RwSignal::new(FieldErrors::new());
    let banner = RwSignal::new(None::<String>);
    let ready = RwSignal::new(editing.is_none());
    let busy = RwSignal::new(false);

    if let Some(id) = editing {
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.service(id).await;
            if !mounted.is_alive() {
                return;
            }
            match result {
                Ok(service) => form.set(ServiceForm::edit(&service)),
                Err(e) => banner.set(Some(e.user_message())),
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
                Some(id) => api.update_service(id, &input).await,
                None => api.create_service(&input).await,
            };
            if !mounted.is_alive() {
                return;
            }
            busy.set(false);
            match result {
                Ok(service) => {
                    let verb = if editing.is_some() { "updated" } else { "created" };
                    notices.update(|n| n.success(format!("{} {verb}", service.name)));
                    pending.set(Some(format!("/services/{}", service.id)));
                }
                Err(e) => {
                    let (message, fields) = submission_failure(&e);
                    banner.set(Some(message));
                    errors.set(fields);
                }
            }
        });
    };

    let title = if editing.is_some() { "Edit service" } else { "New service" };
    let cancel_href = editing.map_or_else(|| "/services".to_owned(), |id| format!("/services/{id}"));
    let required = move || form.with(|f| f.mode == FormMode::Create);

    view! {
        <div class="form-page">
            <h1>{title}</h1>
            <Show when=move || banner.get().is_some()>
                <p class="page-error" role="alert">{move || banner.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || ready.get() fallback=|| view! { <p class="page-status">"Loading service..."</p> }>
                <form class="form-card" on:submit=on_submit.clone() novalidate=true>
                    <TextField
                        label="Name"
                        field="name"
                        value=Signal::derive(move || form.with(|f| f.name.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.name = v))
                        errors=errors
                    />
                    <TextField
                        label="Category"
                        field="category"
                        placeholder="Streaming, Cloud, Productivity..."
                        value=Signal::derive(move || form.with(|f| f.category.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.category = v))
                        errors=errors
                    />
                    <TextField
                        label=if required() { "Website" } else { "Website (optional)" }
                        field="website_url"
                        input_type="url"
                        placeholder="https://"
                        value=Signal::derive(move || form.with(|f| f.website_url.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.website_url = v))
                        errors=errors
                    />
                    <TextField
                        label=if required() { "Description" } else { "Description (optional)" }
                        field="description"
                        multiline=true
                        value=Signal::derive(move || form.with(|f| f.description.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.description = v))
                        errors=errors
                    />
                    <div class="form-card__actions">
                        <A href=cancel_href.clone() attr:class="btn">"Cancel"</A>
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Saving..." } else { "Save service" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
