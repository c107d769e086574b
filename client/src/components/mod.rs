//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and form pieces while reading shared state
//! from Leptos context providers.

pub mod confirm_dialog;
pub mod field_error;
pub mod guarded;
pub mod layout;
pub mod status_badge;
pub mod text_field;
