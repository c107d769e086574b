use serde_json::json;

use crate::billing::BillingCycle;
use crate::error::ApiError;
use crate::test_support::Harness;
use crate::transport::Method;
use crate::types::{PasswordChange, ProfileUpdate, ServiceInput, SubscriptionPatch, SubscriptionStatus};

fn subscription(id: i64, cycle: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "service_id": 1,
        "plan": "Pro",
        "price": "120.00",
        "currency": "USD",
        "billing_cycle": cycle,
        "status": "active",
        "created_at": "2024-05-01T00:00:00Z",
        "next_billing_date": "2025-05-01"
    })
}

#[tokio::test]
async fn list_subscriptions_infers_missing_cycles() {
    let h = Harness::new();
    h.backend.respond(
        Method::Get,
        "/subscriptions",
        200,
        json!({"data": [subscription(1, None), subscription(2, Some("monthly"))]}),
    );

    let subs = h.api.list_subscriptions().await.unwrap();
    assert_eq!(subs[0].billing_cycle, Some(BillingCycle::Annual));
    assert_eq!(subs[1].billing_cycle, Some(BillingCycle::Monthly));
}

#[tokio::test]
async fn service_crud_paths() {
    let h = Harness::new();
    let service = json!({"id": 4, "name": "GitHub", "category": "Development"});
    h.backend.respond(Method::Post, "/services", 201, json!({"data": service}));
    h.backend.respond(Method::Put, "/services/4", 200, json!({"data": service}));
    h.backend.respond(Method::Get, "/services/4", 200, json!({"data": service}));
    h.backend.respond(Method::Delete, "/services/4", 200, json!({"message": "Service deleted"}));

    let input = ServiceInput { name: "GitHub".into(), category: "Development".into(), ..ServiceInput::default() };
    assert_eq!(h.api.create_service(&input).await.unwrap().id, 4);
    assert_eq!(h.api.update_service(4, &input).await.unwrap().name, "GitHub");
    assert_eq!(h.api.service(4).await.unwrap().category, "Development");
    assert_eq!(h.api.delete_service(4).await.unwrap().as_deref(), Some("Service deleted"));
    assert_eq!(h.backend.requests().len(), 4);
}

#[tokio::test]
async fn cancel_and_reactivate_use_bodiless_patch() {
    let h = Harness::new();
    let mut canceled = subscription(5, Some("monthly"));
    canceled["status"] = json!("canceled");
    h.backend.respond(Method::Patch, "/subscriptions/5/cancel", 200, json!({"data": canceled}));
    h.backend.respond(Method::Patch, "/subscriptions/5/reactivate", 200, json!({"data": subscription(5, None)}));

    let sub = h.api.cancel_subscription(5).await.unwrap();
    assert_eq!(sub.status, SubscriptionStatus::Canceled);
    let sub = h.api.reactivate_subscription(5).await.unwrap();
    assert!(sub.is_active());
    assert_eq!(sub.billing_cycle, Some(BillingCycle::Annual));

    let sent = h.backend.requests_to(Method::Patch, "/subscriptions/5/cancel");
    assert_eq!(sent[0].body, None);
}

#[tokio::test]
async fn patch_sends_only_changed_fields() {
    let h = Harness::new();
    h.backend.respond(Method::Patch, "/subscriptions/5", 200, json!({"data": subscription(5, Some("monthly"))}));

    let patch = SubscriptionPatch { plan: Some("Team".into()), ..SubscriptionPatch::default() };
    h.api.patch_subscription(5, &patch).await.unwrap();

    let sent = h.backend.requests_to(Method::Patch, "/subscriptions/5");
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"plan":"Team"}"#));
}

#[tokio::test]
async fn stats_pass_through_server_keys() {
    let h = Harness::new();
    h.backend.respond(Method::Get, "/subscriptions/stats", 200, json!({"data": {"total": 3, "active": 2}}));

    let stats = h.api.subscription_stats().await.unwrap();
    assert_eq!(stats["total"], 3);
}

#[tokio::test]
async fn profile_update_and_password_change() {
    let h = Harness::new();
    h.backend.respond(Method::Put, "/profile", 200, json!({"data": {"id": 1, "name": "New Name", "email": "n@example.com"}}));
    h.backend.respond(Method::Put, "/change-password", 200, json!({"success": true, "message": "Password changed"}));

    let user = h
        .api
        .update_profile(&ProfileUpdate { name: "New Name".into(), email: "n@example.com".into() })
        .await
        .unwrap();
    assert_eq!(user.name, "New Name");

    let message = h
        .api
        .change_password(&PasswordChange {
            current_password: "old-password".into(),
            new_password: "new-password".into(),
            new_password_confirmation: "new-password".into(),
        })
        .await
        .unwrap();
    assert_eq!(message.as_deref(), Some("Password changed"));
}

#[tokio::test]
async fn wrong_current_password_is_validation_error() {
    let h = Harness::new();
    h.backend.respond(
        Method::Put,
        "/change-password",
        422,
        json!({"message": "Current password is incorrect", "errors": {"current_password": ["Current password is incorrect"]}}),
    );

    let err = h
        .api
        .change_password(&PasswordChange {
            current_password: "nope".into(),
            new_password: "new-password".into(),
            new_password_confirmation: "new-password".into(),
        })
        .await
        .unwrap_err();
    assert!(err.field_errors().unwrap().contains_key("current_password"));
    assert!(matches!(err, ApiError::Validation { .. }));
}
