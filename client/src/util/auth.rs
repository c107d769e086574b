//! Shared route-guard UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every guarded view applies the same redirect behavior: the core decides,
//! this module turns a redirect decision into a history-replacing navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use techsubs_api::GuardDecision;

/// Path to navigate to, if the decision is a redirect.
pub fn redirect_target(decision: &GuardDecision) -> Option<&str> {
    match decision {
        GuardDecision::Redirect(path) => Some(path.as_str()),
        GuardDecision::Render | GuardDecision::Placeholder => None,
    }
}

/// Navigate whenever the guard decision becomes a redirect.
///
/// Replaces the history entry so "back" does not return to a view the
/// visitor was never allowed to see.
pub fn install_guard_redirect<F>(decision: Memo<GuardDecision>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let decision = decision.get();
        if let Some(target) = redirect_target(&decision) {
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
