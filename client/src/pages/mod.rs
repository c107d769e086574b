//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (loading, submitting, local
//! form state) and delegates shared chrome to `components`. Access control
//! is not a page concern: every page is mounted inside `Guarded`.

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod register;
pub mod reports;
pub mod service_detail;
pub mod service_form;
pub mod services;
pub mod subscription_detail;
pub mod subscription_form;
pub mod subscriptions;
