//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use techsubs_api::{ApiClient, RouteGuard, SessionStore};

use crate::components::guarded::Guarded;
use crate::components::layout::AppLayout;
use crate::net::browser::{BrowserNavigator, GlooBackend, LocalTokenStore};
use crate::pages::{
    dashboard::DashboardPage, landing::LandingPage, login::LoginPage, not_found::NotFoundPage, profile::ProfilePage,
    register::RegisterPage, reports::ReportsPage, service_detail::ServiceDetailPage, service_form::ServiceFormPage,
    services::ServicesPage, subscription_detail::SubscriptionDetailPage, subscription_form::SubscriptionFormPage,
    subscriptions::SubscriptionsPage,
};
use crate::state::notice::NoticeState;
use crate::state::session::AppSession;
use crate::util::config::api_config;

/// Root application component.
///
/// Builds the core client over the browser adapters, starts session
/// restoration, provides shared state, and mounts every route behind the
/// route guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = ApiClient::new(
        api_config(),
        Arc::new(GlooBackend),
        Arc::new(LocalTokenStore),
        Arc::new(BrowserNavigator),
    );
    let store = SessionStore::new(api);
    let app = AppSession::new(store.clone(), RouteGuard::default());
    app.mirror();
    leptos::task::spawn_local(async move {
        store.initialize().await;
    });

    provide_context(app);
    provide_context(RwSignal::new(NoticeState::default()));

    view! {
        <Title text="TechSubs"/>

        <Router>
            <AppLayout>
                <Routes fallback=|| view! { <Guarded><NotFoundPage/></Guarded> }>
                    <Route path=StaticSegment("") view=|| view! { <Guarded><LandingPage/></Guarded> }/>
                    <Route path=StaticSegment("login") view=|| view! { <Guarded><LoginPage/></Guarded> }/>
                    <Route path=StaticSegment("register") view=|| view! { <Guarded><RegisterPage/></Guarded> }/>
                    <Route path=StaticSegment("dashboard") view=|| view! { <Guarded><DashboardPage/></Guarded> }/>

                    <Route path=StaticSegment("services") view=|| view! { <Guarded><ServicesPage/></Guarded> }/>
                    <Route
                        path=(StaticSegment("services"), StaticSegment("new"))
                        view=|| view! { <Guarded><ServiceFormPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("services"), ParamSegment("id"), StaticSegment("edit"))
                        view=|| view! { <Guarded><ServiceFormPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("services"), ParamSegment("id"))
                        view=|| view! { <Guarded><ServiceDetailPage/></Guarded> }
                    />

                    <Route path=StaticSegment("subscriptions") view=|| view! { <Guarded><SubscriptionsPage/></Guarded> }/>
                    <Route
                        path=(StaticSegment("subscriptions"), StaticSegment("new"))
                        view=|| view! { <Guarded><SubscriptionFormPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("subscriptions"), ParamSegment("id"), StaticSegment("edit"))
                        view=|| view! { <Guarded><SubscriptionFormPage/></Guarded> }
                    />
                    <Route
                        path=(StaticSegment("subscriptions"), ParamSegment("id"))
                        view=|| view! { <Guarded><SubscriptionDetailPage/></Guarded> }
                    />

                    <Route path=StaticSegment("reports") view=|| view! { <Guarded><ReportsPage/></Guarded> }/>
                    <Route path=StaticSegment("profile") view=|| view! { <Guarded><ProfilePage/></Guarded> }/>
                </Routes>
            </AppLayout>
        </Router>
    }
}
