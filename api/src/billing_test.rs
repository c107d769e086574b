use serde_json::json;

use super::*;

#[test]
fn parse_accepts_aliases() {
    assert_eq!(BillingCycle::parse("Monthly"), Some(BillingCycle::Monthly));
    assert_eq!(BillingCycle::parse("semiannual"), Some(BillingCycle::SemiAnnual));
    assert_eq!(BillingCycle::parse("yearly"), Some(BillingCycle::Annual));
    assert_eq!(BillingCycle::parse("weekly"), None);
}

#[test]
fn serde_uses_kebab_case_wire_values() {
    assert_eq!(serde_json::to_value(BillingCycle::SemiAnnual).unwrap(), json!("semi-annual"));
    let cycle: BillingCycle = serde_json::from_value(json!("quarterly")).unwrap();
    assert_eq!(cycle, BillingCycle::Quarterly);
    assert!(serde_json::from_value::<BillingCycle>(json!("fortnightly")).is_err());
}

#[test]
fn infer_from_day_gaps() {
    assert_eq!(BillingCycle::infer(Some("2024-01-01"), Some("2025-01-01")), BillingCycle::Annual);
    assert_eq!(BillingCycle::infer(Some("2025-01-01"), Some("2025-07-01")), BillingCycle::SemiAnnual);
    assert_eq!(BillingCycle::infer(Some("2025-01-01T10:00:00Z"), Some("2025-04-01")), BillingCycle::Quarterly);
    assert_eq!(BillingCycle::infer(Some("2025-01-01"), Some("2025-02-01")), BillingCycle::Monthly);
}

#[test]
fn infer_defaults_to_monthly_without_dates() {
    assert_eq!(BillingCycle::infer(None, Some("2025-02-01")), BillingCycle::Monthly);
    assert_eq!(BillingCycle::infer(Some("garbage"), Some("2025-02-01")), BillingCycle::Monthly);
}

#[test]
fn display_text_defaults_and_capitalizes() {
    assert_eq!(cycle_display_text(None), "Monthly");
    assert_eq!(cycle_display_text(Some("  ")), "Monthly");
    assert_eq!(cycle_display_text(Some("semi-annual")), "Semi-Annual");
    assert_eq!(cycle_display_text(Some("weekly")), "Weekly");
}

#[test]
fn monthly_equivalent_spreads_price() {
    assert!((monthly_equivalent(120.0, BillingCycle::Annual) - 10.0).abs() < 1e-9);
    assert!((monthly_equivalent(30.0, BillingCycle::Quarterly) - 10.0).abs() < 1e-9);
    assert!((monthly_equivalent(9.99, BillingCycle::Monthly) - 9.99).abs() < 1e-9);
}

#[test]
fn ensure_fills_only_missing_cycles() {
    let base: Subscription = serde_json::from_value(json!({
        "id": 1,
        "service_id": 2,
        "plan": "Pro",
        "price": 99.0,
        "status": "active",
        "created_at": "2024-03-01T00:00:00Z",
        "next_billing_date": "2025-03-01"
    }))
    .unwrap();
    let mut explicit = base.clone();
    explicit.billing_cycle = Some(BillingCycle::Monthly);

    let filled = with_billing_cycles(vec![base, explicit]);
    assert_eq!(filled[0].billing_cycle, Some(BillingCycle::Annual));
    assert_eq!(filled[1].billing_cycle, Some(BillingCycle::Monthly));
}
