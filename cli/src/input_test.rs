use serde_json::json;
use time::macros::date;

use super::*;

fn service() -> Service {
    serde_json::from_value(json!({
        "id": 3,
        "name": "Netflix",
        "category": "Streaming",
        "website_url": "https://netflix.com",
        "description": "Video"
    }))
    .unwrap()
}

#[test]
fn service_edit_keeps_unset_fields() {
    let fields = ServiceFields { category: Some("Video".to_owned()), ..ServiceFields::default() };
    let input = fields.edit(&service()).to_input().expect("valid");
    assert_eq!(input.name, "Netflix");
    assert_eq!(input.category, "Video");
    assert_eq!(input.website_url.as_deref(), Some("https://netflix.com"));
}

#[test]
fn service_create_requires_every_field() {
    let form = ServiceFields { name: Some("Figma".to_owned()), ..ServiceFields::default() }.apply(ServiceForm::create());
    let errors = form.to_input().expect_err("incomplete");
    assert!(errors.contains_key("category"));
    assert!(errors.contains_key("website_url"));
    assert!(errors.contains_key("description"));
    assert!(!errors.contains_key("name"));
}

#[test]
fn subscription_fields_feed_the_shared_form() {
    let form = SubscriptionForm::from(SubscriptionFields {
        service_id: "3".to_owned(),
        plan: "Premium".to_owned(),
        price: "15.99".to_owned(),
        currency: "eur".to_owned(),
        cycle: "annual".to_owned(),
        status: "active".to_owned(),
        next_billing: "2025-03-01".to_owned(),
    });
    let input = form.to_input().expect("valid");
    assert_eq!(input.service_id, 3);
    assert_eq!(input.currency, "EUR");
    assert_eq!(input.billing_cycle, BillingCycle::Annual);
    assert_eq!(input.next_billing_date, "2025-03-01");
}

#[test]
fn empty_patch_is_empty() {
    let patch = SubscriptionPatchFields::default().to_patch().expect("no flags is valid");
    assert!(patch.is_empty());
}

#[test]
fn patch_carries_only_given_fields() {
    let fields = SubscriptionPatchFields {
        price: Some(" 9.5 ".to_owned()),
        status: Some("Cancelled".to_owned()),
        currency: Some("gbp".to_owned()),
        ..SubscriptionPatchFields::default()
    };
    let patch = fields.to_patch().expect("valid");
    assert_eq!(patch.price, Some(9.5));
    assert_eq!(patch.status, Some(SubscriptionStatus::Canceled));
    assert_eq!(patch.currency.as_deref(), Some("GBP"));
    assert_eq!(patch.plan, None);
    assert_eq!(patch.next_billing_date, None);
}

#[test]
fn patch_collects_every_bad_flag() {
    let fields = SubscriptionPatchFields {
        plan: Some("  ".to_owned()),
        price: Some("0".to_owned()),
        cycle: Some("weekly".to_owned()),
        next_billing: Some("2025-3-1".to_owned()),
        ..SubscriptionPatchFields::default()
    };
    let errors = fields.to_patch().expect_err("invalid");
    let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
    assert_eq!(keys, ["billing_cycle", "next_billing_date", "plan", "price"]);
}

#[test]
fn profile_edit_falls_back_to_current_values() {
    let user: User = serde_json::from_value(json!({ "id": 1, "name": "Ada", "email": "ada@example.com" })).unwrap();
    let fields = ProfileFields { name: Some("Ada L.".to_owned()), email: None };
    assert!(!fields.is_empty());
    let update = fields.edit(&user).to_update().expect("valid");
    assert_eq!(update.name, "Ada L.");
    assert_eq!(update.email, "ada@example.com");
}

#[test]
fn year_filter_is_narrowed_by_explicit_dates() {
    let fields = ReportFilterFields {
        year: Some(2025),
        from: Some("2025-06-01".to_owned()),
        status: Some("paused".to_owned()),
        service: Some("  ".to_owned()),
        ..ReportFilterFields::default()
    };
    let filters = fields.to_filters().expect("valid");
    assert_eq!(filters.date_from, Some(date!(2025 - 06 - 01)));
    assert_eq!(filters.date_to, Some(date!(2025 - 12 - 31)));
    assert_eq!(filters.status, Some(SubscriptionStatus::Paused));
    assert_eq!(filters.service, None);
}

#[test]
fn unreadable_report_filters_are_rejected() {
    let fields = ReportFilterFields {
        to: Some("soon".to_owned()),
        status: Some("expired".to_owned()),
        ..ReportFilterFields::default()
    };
    let errors = fields.to_filters().expect_err("invalid");
    assert!(errors.contains_key("date_to"));
    assert!(errors.contains_key("status"));
}

#[test]
fn value_parsers_name_accepted_values() {
    assert_eq!(export_format("XLS"), Ok(ExportFormat::Xls));
    assert!(export_format("pdf").unwrap_err().contains("csv or xls"));
    assert_eq!(status_filter("active"), Ok(SubscriptionStatus::Active));
    assert!(status_filter("gone").is_err());
}
