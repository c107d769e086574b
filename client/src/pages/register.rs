//! Account registration form.

use leptos::prelude::*;
use leptos_router::components::A;
use techsubs_api::FieldErrors;
use techsubs_api::validation::RegisterForm;

use crate::components::field_error::FieldError;
use crate::state::session::AppSession;
use crate::util::mounted::Mounted;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let store = expect_context::<AppSession>().store;
    let mounted = Mounted::track();

    let form = RwSignal::new(RegisterForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let banner = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let values = form.get_untracked();
        let invalid = values.validate();
        banner.set(None);
        if !invalid.is_empty() {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::new());
        busy.set(true);

        let store = store.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let outcome = store
                .register(values.name.trim(), values.email.trim(), &values.password, &values.password_confirmation)
                .await;
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
                <h1>"Create your account"</h1>
                <Show when=move || banner.get().is_some()>
                    <p class="auth-card__error" role="alert">{move || banner.get().unwrap_or_default()}</p>
                </Show>
                <label class="field">
                    <span class="field__label">"Name"</span>
                    <input
                        class="field__input"
                        type="text"
                        autocomplete="name"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <FieldError errors=errors field="name"/>
                </label>
                <label class="field">
                    <span class="field__label">"Email"</span>
                    <input
                        class="field__input"
                        type="email"
                        autocomplete="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                    />
                    <FieldError errors=errors field="email"/>
                </label>
                <label class="field">
                    <span class="field__label">"Password"</span>
                    <input
                        class="field__input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                    />
                    <FieldError errors=errors field="password"/>
                </label>
                <label class="field">
                    <span class="field__label">"Confirm password"</span>
                    <input
                        class="field__input"
                        type="password"
                        autocomplete="new-password"
                        prop:value=move || form.with(|f| f.password_confirmation.clone())
                        on:input=move |ev| form.update(|f| f.password_confirmation = event_target_value(&ev))
                    />
                    <FieldError errors=errors field="password_confirmation"/>
                </label>
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Creating account..." } else { "Create account" }}
                </button>
                <p class="auth-card__switch">
                    "Already registered? "
                    <A href="/login">"Sign in"</A>
                </p>
            </form>
        </div>
    }
}
