//! Inline message under a form input.

use leptos::prelude::*;
use techsubs_api::FieldErrors;

use crate::util::forms::first_error;

#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        first_error(&errors.get(), field).map(|message| {
            view! { <p class="field-error" role="alert">{message}</p> }
        })
    }
}
