//! Navigation seam used by the pipeline's 401 handler.

use parking_lot::Mutex;

pub const LANDING_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";

pub trait Navigator: Send + Sync {
    /// Path of the view currently shown, e.g. `/dashboard`.
    fn current_path(&self) -> String;

    /// Move to `path`.
    fn navigate(&self, path: &str);
}

/// True for the login and registration views, where a 401 must not redirect.
#[must_use]
pub fn is_auth_screen(path: &str) -> bool {
    path.contains(LOGIN_PATH) || path.contains(REGISTER_PATH)
}

/// Navigator that only records where it was sent.
#[derive(Debug)]
pub struct MemoryNavigator {
    current: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn at(path: &str) -> Self {
        Self {
            current: Mutex::new(path.to_owned()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Every path passed to [`Navigator::navigate`], oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl Default for MemoryNavigator {
    fn default() -> Self {
        Self::at(LANDING_PATH)
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.current.lock().clone()
    }

    fn navigate(&self, path: &str) {
        *self.current.lock() = path.to_owned();
        self.history.lock().push(path.to_owned());
    }
}
