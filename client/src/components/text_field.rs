//! Labeled input bound to one field of a form struct.

use leptos::prelude::*;
use techsubs_api::FieldErrors;

use crate::components::field_error::FieldError;

/// `value` reads the field, `on_input` writes it back. Errors are looked up
/// under `field`, the same key the server uses in 422 bodies.
#[component]
pub fn TextField(
    label: &'static str,
    field: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    errors: RwSignal<FieldErrors>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] multiline: bool,
) -> impl IntoView {
    let input = if multiline {
        view! {
            <textarea
                class="field__input field__input--multiline"
                name=field
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                class="field__input"
                type=input_type
                name=field
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    };

    view! {
        <label class="field">
            <span class="field__label">{label}</span>
            {input}
            <FieldError errors=errors field=field/>
        </label>
    }
}
