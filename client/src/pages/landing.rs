//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::session::AppSession;

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = expect_context::<AppSession>().session;
    let authenticated = move || session.with(techsubs_api::Session::is_authenticated);

    view! {
        <section class="landing">
            <h1 class="landing__title">"Keep every tech subscription in one place"</h1>
            <p class="landing__lead">
                "Track services, plans and renewal dates, see what you spend each month, and export reports."
            </p>
            <div class="landing__actions">
                <Show
                    when=authenticated
                    fallback=|| {
                        view! {
                            <A href="/register" attr:class="btn btn--primary">"Get started"</A>
                            <A href="/login" attr:class="btn">"Sign in"</A>
                        }
                    }
                >
                    <A href="/dashboard" attr:class="btn btn--primary">"Go to dashboard"</A>
                </Show>
            </div>
        </section>
    }
}
