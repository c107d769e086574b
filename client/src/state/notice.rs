//! One-shot banners that survive a navigation.
//!
//! DESIGN
//! ======
//! A view that finishes an action and then navigates away (create, delete)
//! posts a notice; the layout shows it on the next view and clears it on
//! dismiss or on the next post.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "notice notice--success",
            Self::Error => "notice notice--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeState {
    pub current: Option<Notice>,
}

impl NoticeState {
    pub fn success(&mut self, text: impl Into<String>) {
        self.current = Some(Notice { kind: NoticeKind::Success, text: text.into() });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.current = Some(Notice { kind: NoticeKind::Error, text: text.into() });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}
