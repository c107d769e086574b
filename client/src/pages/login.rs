//! Sign-in form.
//!
//! On success the session becomes authenticated and the route guard moves
//! the visitor off this guest-only view to the dashboard.

use leptos::prelude::*;
use leptos_router::components::A;
use techsubs_api::FieldErrors;
use techsubs_api::validation::validate_login;

use crate::components::field_error::FieldError;
use crate::state::session::AppSession;
use crate::util::mounted::Mounted;

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = expect_context::<AppSession>().store;
    let mounted = Mounted::track();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember = RwSignal::new(false);
    let errors = RwSignal::new(FieldErrors::new());
    let banner = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let email_value = email.get_untracked().trim().to_owned();
        let password_value = password.get_untracked();
        let invalid = validate_login(&email_value, &password_value);
        banner.set(None);
        if !invalid.is_empty() {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::new());
        busy.set(true);

        let store = store.clone();
        let mounted = mounted.clone();
        let remember_value = remember.get_untracked();
        leptos::task::spawn_local(async move {
            let outcome = store.login(&email_value, &password_value, remember_value).await;
            if !mounted.is_alive() {
                return;
            }
            if !outcome.is_success() {
                banner.set(outcome.message().map(str::to_owned));
                errors.set(outcome.errors().cloned().unwrap_or_default());
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit novalidate=true>
                <h1>"Sign in"</h1>
                <Show when=move || banner.get().is_some()>
                    <p class="auth-card__error" role="alert">{move || banner.get().unwrap_or_default()}</p>
                </Show>
                <label class="field">
                    <span class="field__label">"Email"</span>
                    <input
                        class="field__input"
                        type="email"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field="email"/>
                </label>
                <label class="field">
                    <span class="field__label">"Password"</span>
                    <input
                        class="field__input"
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <FieldError errors=errors field="password"/>
                </label>
                <label class="field field--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || remember.get()
                        on:change=move |ev| remember.set(event_target_checked(&ev))
                    />
                    <span>"Remember me"</span>
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
                <p class="auth-card__switch">
                    "No account yet? "
                    <A href="/register">"Create one"</A>
                </p>
            </form>
        </div>
    }
}
