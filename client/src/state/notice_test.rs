use super::*;

#[test]
fn notice_state_starts_empty() {
    assert_eq!(NoticeState::default().current, None);
}

#[test]
fn later_notice_replaces_earlier() {
    let mut state = NoticeState::default();
    state.success("Service created");
    state.error("Could not delete subscription");
    let notice = state.current.clone().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.text, "Could not delete subscription");
}

#[test]
fn dismiss_clears_notice() {
    let mut state = NoticeState::default();
    state.success("Saved");
    state.dismiss();
    assert_eq!(state.current, None);
}

#[test]
fn kind_maps_to_modifier_class() {
    assert_eq!(NoticeKind::Success.class(), "notice notice--success");
    assert_eq!(NoticeKind::Error.class(), "notice notice--error");
}
