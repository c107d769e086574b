//! Bearer-authorized resource calls: services, subscriptions, profile.
//!
//! Thin typed wrappers over [`ApiClient`]; every call inherits the
//! pipeline's authorization, retry and 401 behavior. Subscription lists come
//! back with billing cycles filled in.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use crate::billing::{ensure_billing_cycle, with_billing_cycles};
use crate::error::ApiError;
use crate::pipeline::ApiClient;
use crate::session::PROFILE_ENDPOINT;
use crate::types::{
    PasswordChange, ProfileUpdate, Service, ServiceInput, Stats, Subscription, SubscriptionInput, SubscriptionPatch,
    User,
};

pub const SERVICES_ENDPOINT: &str = "/services";
pub const SUBSCRIPTIONS_ENDPOINT: &str = "/subscriptions";
pub const CHANGE_PASSWORD_ENDPOINT: &str = "/change-password";

fn service_path(id: i64) -> String {
    format!("{SERVICES_ENDPOINT}/{id}")
}

fn subscription_path(id: i64) -> String {
    format!("{SUBSCRIPTIONS_ENDPOINT}/{id}")
}

impl ApiClient {
    // ---- services ----

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn list_services(&self) -> Result<Vec<Service>, ApiError> {
        self.get(SERVICES_ENDPOINT).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn service(&self, id: i64) -> Result<Service, ApiError> {
        self.get(&service_path(id)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`]; a 422 carries field errors for the form.
    pub async fn create_service(&self, input: &ServiceInput) -> Result<Service, ApiError> {
        self.post(SERVICES_ENDPOINT, input).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`]; a 422 carries field errors for the form.
    pub async fn update_service(&self, id: i64, input: &ServiceInput) -> Result<Service, ApiError> {
        self.put(&service_path(id), input).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn delete_service(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.delete(&service_path(id)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn service_stats(&self) -> Result<Stats, ApiError> {
        self.get(&format!("{SERVICES_ENDPOINT}/stats")).await
    }

    // ---- subscriptions ----

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>, ApiError> {
        self.get(SUBSCRIPTIONS_ENDPOINT).await.map(with_billing_cycles)
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn subscription(&self, id: i64) -> Result<Subscription, ApiError> {
        self.get(&subscription_path(id)).await.map(filled)
    }

    /// # Errors
    ///
    /// Any [`ApiError`]; a 422 carries field errors for the form.
    pub async fn create_subscription(&self, input: &SubscriptionInput) -> Result<Subscription, ApiError> {
        self.post(SUBSCRIPTIONS_ENDPOINT, input).await.map(filled)
    }

    /// # Errors
    ///
    /// Any [`ApiError`]; a 422 carries field errors for the form.
    pub async fn update_subscription(&self, id: i64, input: &SubscriptionInput) -> Result<Subscription, ApiError> {
        self.put(&subscription_path(id), input).await.map(filled)
    }

    /// # Errors
    ///
    /// Any [`ApiError`]; a 422 carries field errors.
    pub async fn patch_subscription(&self, id: i64, patch: &SubscriptionPatch) -> Result<Subscription, ApiError> {
        self.patch(&subscription_path(id), patch).await.map(filled)
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn cancel_subscription(&self, id: i64) -> Result<Subscription, ApiError> {
        self.patch_empty(&format!("{}/cancel", subscription_path(id))).await.map(filled)
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn reactivate_subscription(&self, id: i64) -> Result<Subscription, ApiError> {
        self.patch_empty(&format!("{}/reactivate", subscription_path(id))).await.map(filled)
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn delete_subscription(&self, id: i64) -> Result<Option<String>, ApiError> {
        self.delete(&subscription_path(id)).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn subscription_stats(&self) -> Result<Stats, ApiError> {
        self.get(&format!("{SUBSCRIPTIONS_ENDPOINT}/stats")).await
    }

    // ---- profile ----

    /// # Errors
    ///
    /// Any [`ApiError`] from the pipeline.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get(PROFILE_ENDPOINT).await
    }

    /// Save name and email. Callers should hand the returned user to
    /// [`crate::SessionStore::refresh_user`].
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a 422 carries field errors for the form.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.put(PROFILE_ENDPOINT, update).await
    }

    /// # Errors
    ///
    /// Any [`ApiError`]; a 422 carries field errors for the form.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<Option<String>, ApiError> {
        self.put_message(CHANGE_PASSWORD_ENDPOINT, change).await
    }
}

fn filled(mut subscription: Subscription) -> Subscription {
    ensure_billing_cycle(&mut subscription);
    subscription
}
