//! Reactive state shared through Leptos context.
//!
//! ARCHITECTURE
//! ============
//! `session` mirrors the core's session cell into a signal; `notice` carries
//! one-shot banners across navigations (e.g. "Service deleted").

pub mod notice;
pub mod session;
