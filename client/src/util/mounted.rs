//! Liveness flag for async work started by a view.
//!
//! Requests outlive the component that started them. Results that arrive
//! after the view unmounted are dropped instead of written into disposed
//! signals.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::on_cleanup;

#[derive(Clone, Debug)]
pub struct Mounted(Arc<AtomicBool>);

impl Mounted {
    /// Flag tied to the current reactive owner; flips to dead on cleanup.
    pub fn track() -> Self {
        let alive = Arc::new(AtomicBool::new(true));
        let on_drop = alive.clone();
        on_cleanup(move || on_drop.store(false, Ordering::Relaxed));
        Self(alive)
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
