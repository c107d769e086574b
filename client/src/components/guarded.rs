//! Route wrapper that renders, holds, or redirects per the route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route in the app is mounted inside [`Guarded`]. The decision comes
//! from the core guard for the current path and session; while the session
//! is still loading, protected and guest-only views show a neutral
//! placeholder and nothing navigates.

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use techsubs_api::GuardDecision;

use crate::state::session::AppSession;
use crate::util::auth::install_guard_redirect;

#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let app = expect_context::<AppSession>();
    let location = use_location();
    let guard = app.guard;
    let session = app.session;

    let decision = Memo::new(move |_| guard.decide_path(&location.pathname.get(), &session.get()));
    install_guard_redirect(decision, use_navigate());

    move || match decision.get() {
        GuardDecision::Render => children().into_any(),
        GuardDecision::Placeholder => view! {
            <div class="page-status" aria-busy="true">
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        GuardDecision::Redirect(_) => view! {
            <div class="page-status">
                <p>"Redirecting..."</p>
            </div>
        }
        .into_any(),
    }
}
