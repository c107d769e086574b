//! Route guard: which view may render for a given session state.
//!
//! DESIGN
//! ======
//! Routing is decided here, not in the view layer, so the rules are natively
//! testable and shared by every front end. The guard never remembers the
//! attempted destination; an unauthenticated visitor to a protected view goes
//! to `/login` and, after signing in, to the dashboard.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::navigation::{DASHBOARD_PATH, LANDING_PATH, LOGIN_PATH, REGISTER_PATH};
use crate::session::Session;

/// The three states the guard distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Unauthenticated,
    Authenticated,
}

impl From<&Session> for GuardState {
    fn from(session: &Session) -> Self {
        if session.loading {
            Self::Loading
        } else if session.is_authenticated() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Anyone, any time.
    Public,
    /// Only signed-out visitors (login, register).
    GuestOnly,
    /// Only signed-in users.
    Protected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Services,
    ServiceNew,
    ServiceDetail(i64),
    ServiceEdit(i64),
    Subscriptions,
    SubscriptionNew,
    SubscriptionDetail(i64),
    SubscriptionEdit(i64),
    Reports,
    Profile,
    NotFound(String),
}

impl Route {
    /// Resolve a location path. Query strings and trailing slashes are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let bare = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = bare.split('/').filter(|segment| !segment.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Landing,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["services"] => Self::Services,
            ["services", "new"] => Self::ServiceNew,
            ["services", id] => parse_id(id).map_or_else(|| Self::not_found(path), Self::ServiceDetail),
            ["services", id, "edit"] => parse_id(id).map_or_else(|| Self::not_found(path), Self::ServiceEdit),
            ["subscriptions"] => Self::Subscriptions,
            ["subscriptions", "new"] => Self::SubscriptionNew,
            ["subscriptions", id] => {
                parse_id(id).map_or_else(|| Self::not_found(path), Self::SubscriptionDetail)
            }
            ["subscriptions", id, "edit"] => {
                parse_id(id).map_or_else(|| Self::not_found(path), Self::SubscriptionEdit)
            }
            ["reports"] => Self::Reports,
            ["profile"] => Self::Profile,
            _ => Self::not_found(path),
        }
    }

    fn not_found(path: &str) -> Self {
        Self::NotFound(path.to_owned())
    }

    /// Canonical path; `NotFound` keeps the path it was parsed from.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Landing => LANDING_PATH.to_owned(),
            Self::Login => LOGIN_PATH.to_owned(),
            Self::Register => REGISTER_PATH.to_owned(),
            Self::Dashboard => DASHBOARD_PATH.to_owned(),
            Self::Services => "/services".to_owned(),
            Self::ServiceNew => "/services/new".to_owned(),
            Self::ServiceDetail(id) => format!("/services/{id}"),
            Self::ServiceEdit(id) => format!("/services/{id}/edit"),
            Self::Subscriptions => "/subscriptions".to_owned(),
            Self::SubscriptionNew => "/subscriptions/new".to_owned(),
            Self::SubscriptionDetail(id) => format!("/subscriptions/{id}"),
            Self::SubscriptionEdit(id) => format!("/subscriptions/{id}/edit"),
            Self::Reports => "/reports".to_owned(),
            Self::Profile => "/profile".to_owned(),
            Self::NotFound(path) => path.clone(),
        }
    }

    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Landing | Self::NotFound(_) => Access::Public,
            Self::Login | Self::Register => Access::GuestOnly,
            _ => Access::Protected,
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// What to do with unknown paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UnknownRoutePolicy {
    /// Render the not-found view.
    #[default]
    NotFound,
    /// Send the visitor somewhere else, e.g. the landing page.
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show the requested view.
    Render,
    /// Show a neutral placeholder and do not navigate yet.
    Placeholder,
    /// Replace the current location with this path.
    Redirect(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteGuard {
    pub unknown: UnknownRoutePolicy,
}

impl RouteGuard {
    #[must_use]
    pub fn new(unknown: UnknownRoutePolicy) -> Self {
        Self { unknown }
    }

    #[must_use]
    pub fn decide(&self, route: &Route, state: GuardState) -> GuardDecision {
        if let Route::NotFound(path) = route {
            return match &self.unknown {
                UnknownRoutePolicy::Redirect(target) if target != path => GuardDecision::Redirect(target.clone()),
                _ => GuardDecision::Render,
            };
        }

        match (route.access(), state) {
            (Access::Public, _) => GuardDecision::Render,
            (_, GuardState::Loading) => GuardDecision::Placeholder,
            (Access::Protected, GuardState::Authenticated) | (Access::GuestOnly, GuardState::Unauthenticated) => {
                GuardDecision::Render
            }
            (Access::Protected, GuardState::Unauthenticated) => GuardDecision::Redirect(LOGIN_PATH.to_owned()),
            (Access::GuestOnly, GuardState::Authenticated) => GuardDecision::Redirect(DASHBOARD_PATH.to_owned()),
        }
    }

    /// [`Self::decide`] for a raw path and session.
    #[must_use]
    pub fn decide_path(&self, path: &str, session: &Session) -> GuardDecision {
        self.decide(&Route::parse(path), GuardState::from(session))
    }
}
