//! Navigation requested from async work.
//!
//! Async handlers only record where to go; an effect owned by the view does
//! the routing, the same way other one-shot results are consumed.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

/// Navigate once each time `pending` is filled, then clear it.
pub fn install_pending_navigation<F>(pending: RwSignal<Option<String>>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(path) = pending.get() {
            pending.set(None);
            navigate(&path, NavigateOptions::default());
        }
    });
}
