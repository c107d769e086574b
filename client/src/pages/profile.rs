//! Profile: account details, profile edit, password change.
//!
//! A successful profile update is pushed into the session so the header
//! shows the new name without a reload.

use leptos::prelude::*;
use techsubs_api::FieldErrors;
use techsubs_api::format::{initials, member_since};
use techsubs_api::types::User;
use techsubs_api::validation::{PasswordForm, ProfileForm};

use crate::components::text_field::TextField;
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::forms::submission_failure;
use crate::util::mounted::Mounted;

fn profile_form(user: &User) -> ProfileForm {
    ProfileForm { name: user.name.clone(), email: user.email.clone().unwrap_or_default() }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let app = expect_context::<AppSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let store = app.store.clone();
    let session = app.session;
    let api = app.api();
    let mounted = Mounted::track();

    let user = RwSignal::new(session.get_untracked().user);
    let form = RwSignal::new(user.get_untracked().as_ref().map(profile_form).unwrap_or_default());
    let profile_errors = RwSignal::new(FieldErrors::new());
    let profile_banner = RwSignal::new(None::<String>);
    let saving_profile = RwSignal::new(false);

    let password = RwSignal::new(PasswordForm::default());
    let password_errors = RwSignal::new(FieldErrors::new());
    let password_banner = RwSignal::new(None::<String>);
    let saving_password = RwSignal::new(false);

    {
        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.profile().await;
            if !mounted.is_alive() {
                return;
            }
            match result {
                Ok(fresh) => {
                    form.set(profile_form(&fresh));
                    user.set(Some(fresh));
                }
                Err(e) => profile_banner.set(Some(e.user_message())),
            }
        });
    }

    let on_profile_submit = {
        let api = api.clone();
        let mounted = mounted.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if saving_profile.get_untracked() {
                return;
            }
            profile_banner.set(None);
            let update = match form.get_untracked().to_update() {
                Ok(update) => update,
                Err(invalid) => {
                    profile_errors.set(invalid);
                    return;
                }
            };
            profile_errors.set(FieldErrors::new());
            saving_profile.set(true);

            let api = api.clone();
            let store = store.clone();
            let mounted = mounted.clone();
            leptos::task::spawn_local(async move {
                let result = api.update_profile(&update).await;
                if let Ok(updated) = &result {
                    store.refresh_user(updated.clone());
                }
                if !mounted.is_alive() {
                    return;
                }
                saving_profile.set(false);
                match result {
                    Ok(updated) => {
                        form.set(profile_form(&updated));
                        user.set(Some(updated));
                        notices.update(|n| n.success("Profile updated"));
                    }
                    Err(e) => {
                        let (message, fields) = submission_failure(&e);
                        profile_banner.set(Some(message));
                        profile_errors.set(fields);
                    }
                }
            });
        }
    };

    let on_password_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving_password.get_untracked() {
            return;
        }
        password_banner.set(None);
        let change = match password.get_untracked().to_change() {
            Ok(change) => change,
            Err(invalid) => {
                password_errors.set(invalid);
                return;
            }
        };
        password_errors.set(FieldErrors::new());
        saving_password.set(true);

        let api = api.clone();
        let mounted = mounted.clone();
        leptos::task::spawn_local(async move {
            let result = api.change_password(&change).await;
            if !mounted.is_alive() {
                return;
            }
            saving_password.set(false);
            match result {
                Ok(message) => {
                    password.set(PasswordForm::default());
                    notices.update(|n| n.success(message.unwrap_or_else(|| "Password changed".to_owned())));
                }
                Err(e) => {
                    let (message, fields) = submission_failure(&e);
                    password_banner.set(Some(message));
                    password_errors.set(fields);
                }
            }
        });
    };

    let name = move || user.with(|u| u.as_ref().map(|u| u.name.clone()).unwrap_or_default());

    view! {
        <div class="profile-page">
            <header class="profile-card">
                <span class="avatar avatar--large" aria-hidden="true">{move || initials(&name())}</span>
                <div>
                    <h1>{name}</h1>
                    <p class="profile-card__meta">
                        {move || user.with(|u| u.as_ref().and_then(|u| u.email.clone()).unwrap_or_default())}
                    </p>
                    <p class="profile-card__meta">
                        {move || {
                            format!("Member since {}", user.with(|u| member_since(u.as_ref().and_then(|u| u.created_at.as_deref()))))
                        }}
                    </p>
                </div>
            </header>

            <section class="panel">
                <h2>"Profile"</h2>
                <Show when=move || profile_banner.get().is_some()>
                    <p class="page-error" role="alert">{move || profile_banner.get().unwrap_or_default()}</p>
                </Show>
                <form class="form-card" on:submit=on_profile_submit novalidate=true>
                    <TextField
                        label="Name"
                        field="name"
                        value=Signal::derive(move || form.with(|f| f.name.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.name = v))
                        errors=profile_errors
                    />
                    <TextField
                        label="Email"
                        field="email"
                        input_type="email"
                        value=Signal::derive(move || form.with(|f| f.email.clone()))
                        on_input=Callback::new(move |v| form.update(|f| f.email = v))
                        errors=profile_errors
                    />
                    <div class="form-card__actions">
                        <button class="btn btn--primary" type="submit" disabled=move || saving_profile.get()>
                            {move || if saving_profile.get() { "Saving..." } else { "Save profile" }}
                        </button>
                    </div>
                </form>
            </section>

            <section class="panel">
                <h2>"Change password"</h2>
                <Show when=move || password_banner.get().is_some()>
                    <p class="page-error" role="alert">{move || password_banner.get().unwrap_or_default()}</p>
                </Show>
                <form class="form-card" on:submit=on_password_submit novalidate=true>
                    <TextField
                        label="Current password"
                        field="current_password"
                        input_type="password"
                        value=Signal::derive(move || password.with(|f| f.current_password.clone()))
                        on_input=Callback::new(move |v| password.update(|f| f.current_password = v))
                        errors=password_errors
                    />
                    <TextField
                        label="New password"
                        field="new_password"
                        input_type="password"
                        value=Signal::derive(move || password.with(|f| f.new_password.clone()))
                        on_input=Callback::new(move |v| password.update(|f| f.new_password = v))
                        errors=password_errors
                    />
                    <TextField
                        label="Confirm new password"
                        field="confirm_password"
                        input_type="password"
                        value=Signal::derive(move || password.with(|f| f.confirm_password.clone()))
                        on_input=Callback::new(move |v| password.update(|f| f.confirm_password = v))
                        errors=password_errors
                    />
                    <div class="form-card__actions">
                        <button class="btn btn--primary" type="submit" disabled=move || saving_password.get()>
                            {move || if saving_password.get() { "Updating..." } else { "Update password" }}
                        </button>
                    </div>
                </form>
            </section>
        </div>
    }
}
