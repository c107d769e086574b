use super::*;

#[test]
fn every_status_has_its_own_modifier() {
    let classes: Vec<&str> = SubscriptionStatus::ALL.iter().map(|s| badge_class(*s)).collect();
    assert_eq!(classes, ["badge badge--active", "badge badge--paused", "badge badge--canceled"]);
}
