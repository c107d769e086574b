//! App chrome: header navigation, account menu, and the notice banner.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use techsubs_api::format::initials;
use techsubs_api::navigation::LOGIN_PATH;

use crate::state::notice::NoticeState;
use crate::state::session::{AppSession, display_name, nav_links};
use crate::util::navigation::install_pending_navigation;

#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let app = expect_context::<AppSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let session = app.session;
    let store = app.store.clone();
    let logging_out = RwSignal::new(false);
    let pending = RwSignal::new(None::<String>);
    install_pending_navigation(pending, use_navigate());

    let on_logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        let store = store.clone();
        leptos::task::spawn_local(async move {
            store.logout().await;
            logging_out.set(false);
            pending.set(Some(LOGIN_PATH.to_owned()));
        });
    };

    let authenticated = move || session.with(techsubs_api::Session::is_authenticated);

    view! {
        <div class="app-shell">
            <header class="app-header">
                <A href="/" attr:class="app-header__brand">
                    "TechSubs"
                </A>
                <nav class="app-header__nav">
                    {move || {
                        nav_links(authenticated())
                            .iter()
                            .map(|(href, label)| {
                                view! {
                                    <A href=*href attr:class="app-header__link">
                                        {*label}
                                    </A>
                                }
                            })
                            .collect_view()
                    }}
                </nav>
                <Show when=authenticated>
                    <div class="app-header__account">
                        <span class="avatar" aria-hidden="true">
                            {move || initials(&display_name(&session.get()))}
                        </span>
                        <span class="app-header__name">{move || display_name(&session.get())}</span>
                        <button class="btn app-header__logout" disabled=move || logging_out.get() on:click=on_logout.clone()>
                            {move || if logging_out.get() { "Signing out..." } else { "Logout" }}
                        </button>
                    </div>
                </Show>
            </header>
            {move || {
                notices
                    .get()
                    .current
                    .map(|notice| {
                        view! {
                            <div class=notice.kind.class() role="status">
                                <span>{notice.text}</span>
                                <button class="notice__dismiss" aria-label="Dismiss" on:click=move |_| notices.update(NoticeState::dismiss)>
                                    "✕"
                                </button>
                            </div>
                        }
                    })
            }}
            <main class="app-main">{children()}</main>
        </div>
    }
}
