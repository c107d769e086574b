//! Session state as seen by views.
//!
//! SYSTEM CONTEXT
//! ==============
//! The core owns the session (`SessionStore`) and publishes every change on a
//! watch channel. [`AppSession`] keeps a signal copy of it so components can
//! read the session reactively, and carries the route guard every guarded
//! view consults.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;
use techsubs_api::{ApiClient, RouteGuard, Session, SessionStore};

/// Context value provided once by the app root.
#[derive(Clone, Debug)]
pub struct AppSession {
    pub store: SessionStore,
    pub session: RwSignal<Session>,
    pub guard: RouteGuard,
}

impl AppSession {
    pub fn new(store: SessionStore, guard: RouteGuard) -> Self {
        let session = RwSignal::new(store.snapshot());
        Self { store, session, guard }
    }

    pub fn api(&self) -> ApiClient {
        self.store.api().clone()
    }

    /// Copy every published session change into the signal, for the life of
    /// the app.
    pub fn mirror(&self) {
        let mut rx = self.store.subscribe();
        let session = self.session;
        leptos::task::spawn_local(async move {
            session.set(rx.borrow_and_update().clone());
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                session.set(next);
            }
        });
    }
}

/// Name for the header, falling back to the email, then a generic label.
pub fn display_name(session: &Session) -> String {
    let Some(user) = session.user.as_ref() else {
        return "Account".to_owned();
    };
    if !user.name.trim().is_empty() {
        return user.name.trim().to_owned();
    }
    user.email.clone().filter(|email| !email.trim().is_empty()).unwrap_or_else(|| "Account".to_owned())
}

/// Header links for the current session: the app sections when signed in,
/// the auth screens otherwise.
pub fn nav_links(authenticated: bool) -> &'static [(&'static str, &'static str)] {
    if authenticated {
        &[
            ("/dashboard", "Dashboard"),
            ("/services", "Services"),
            ("/subscriptions", "Subscriptions"),
            ("/reports", "Reports"),
            ("/profile", "Profile"),
        ]
    } else {
        &[("/login", "Sign in"), ("/register", "Create account")]
    }
}
