//! Fallback for paths no route matches.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let location = use_location();

    view! {
        <section class="not-found">
            <h1>"Page not found"</h1>
            <p class="not-found__path">{move || location.pathname.get()}</p>
            <A href="/" attr:class="btn">"Back to home"</A>
        </section>
    }
}
