//! Navigator for a process with no views.
//!
//! The pipeline asks to go to the login screen after a 401. A terminal has
//! nowhere to go, so the request becomes a hint on stderr. While `login` or
//! `register` runs the navigator reports that screen, so a rejected password
//! surfaces as a credential error rather than an expired session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use techsubs_api::navigation::{LOGIN_PATH, Navigator};

/// Pseudo-path reported outside the sign-in commands; never an auth screen.
pub const CLI_PATH: &str = "/cli";

pub const LOGIN_HINT: &str = "Session expired or missing. Run `techsubs login` to sign in again.";

#[derive(Debug)]
pub struct TerminalNavigator {
    screen: RwLock<&'static str>,
    hinted: AtomicBool,
}

impl Default for TerminalNavigator {
    fn default() -> Self {
        Self { screen: RwLock::new(CLI_PATH), hinted: AtomicBool::new(false) }
    }
}

impl TerminalNavigator {
    /// Report `path` as the current screen until the next call.
    pub fn enter(&self, path: &'static str) {
        *self.screen.write().unwrap_or_else(PoisonError::into_inner) = path;
    }

    /// True once the login hint has been printed.
    pub fn hinted(&self) -> bool {
        self.hinted.load(Ordering::Relaxed)
    }
}

impl Navigator for TerminalNavigator {
    fn current_path(&self) -> String {
        (*self.screen.read().unwrap_or_else(PoisonError::into_inner)).to_owned()
    }

    fn navigate(&self, path: &str) {
        if path != LOGIN_PATH {
            tracing::debug!(path, "ignoring navigation");
            return;
        }
        if !self.hinted.swap(true, Ordering::Relaxed) {
            eprintln!("{LOGIN_HINT}");
        }
    }
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;
