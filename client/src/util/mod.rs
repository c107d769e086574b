//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic so views stay small and the pure parts stay natively testable.

pub mod auth;
pub mod clock;
pub mod config;
pub mod download;
pub mod forms;
pub mod mounted;
pub mod navigation;
