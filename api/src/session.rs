//! Session store: who is signed in, and with which bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`Session`] exists per running app, held in the [`ApiClient`]'s watch
//! cell so the pipeline's 401 handler and the views see the same value.
//! [`SessionStore`] is the only code that establishes a session; login and
//! registration are the only ways in, logout and a 401 the only ways out.
//!
//! ERROR HANDLING
//! ==============
//! Session operations never return errors. Login and registration resolve to
//! an [`AuthOutcome`]; initialize and logout always finish with a settled
//! local state, enforced by drop guards so an abandoned future cannot leave
//! the session loading or half cleared.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{ApiError, FieldErrors};
use crate::pipeline::ApiClient;
use crate::types::{AuthPayload, LoginRequest, RegisterRequest, User};

pub const LOGIN_ENDPOINT: &str = "/login";
pub const REGISTER_ENDPOINT: &str = "/register";
pub const LOGOUT_ENDPOINT: &str = "/logout";
pub const PROFILE_ENDPOINT: &str = "/profile";

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Please check your email and password.";
pub const SERVER_TROUBLE_MESSAGE: &str = "The server is having trouble right now. Please try again in a moment.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    /// True until startup validation of a stored token has settled.
    pub loading: bool,
}

impl Session {
    /// Startup state: nobody known yet, validation pending.
    #[must_use]
    pub fn pending() -> Self {
        Self { loading: true, ..Self::default() }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// Signed out and settled.
    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
        self.loading = false;
    }
}

/// Result of a login or registration attempt.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum AuthOutcome {
    Success { user: User },
    Failure { message: String, errors: FieldErrors },
}

impl AuthOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }

    /// Field errors of a failed attempt.
    #[must_use]
    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { errors, .. } => Some(errors),
        }
    }

    fn failure(message: &str) -> Self {
        Self::Failure { message: message.to_owned(), errors: FieldErrors::new() }
    }
}

#[derive(Clone, Copy, Debug)]
enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::Login => LOGIN_FAILED_MESSAGE,
            Self::Register => REGISTER_FAILED_MESSAGE,
        }
    }

    fn outcome_for(self, err: &ApiError) -> AuthOutcome {
        match err {
            ApiError::Validation { message, errors } => AuthOutcome::Failure {
                message: message.clone(),
                errors: errors.clone(),
            },
            ApiError::Unauthorized => match self {
                Self::Login => AuthOutcome::failure(INVALID_CREDENTIALS_MESSAGE),
                Self::Register => AuthOutcome::failure(self.fallback_message()),
            },
            ApiError::Server { .. } => AuthOutcome::failure(SERVER_TROUBLE_MESSAGE),
            _ => AuthOutcome::failure(self.fallback_message()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    api: ApiClient,
}

impl SessionStore {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.api.session_cell().borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.api.subscribe()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.api.session_cell().borrow().is_authenticated()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.api.session_cell().borrow().user.clone()
    }

    /// Restore a session from the persisted token, if there is one.
    ///
    /// Makes exactly one profile request when a token is stored and none
    /// otherwise. A rejected or unverifiable token is discarded.
    pub async fn initialize(&self) {
        let cell = self.api.session_cell();
        cell.send_modify(|session| session.loading = true);
        let _settle = LoadingGuard(cell);

        let Some(token) = self.api.tokens().load() else {
            debug!("no stored token; starting signed out");
            return;
        };
        self.api.set_auth_token(Some(&token));

        match self.api.get::<User>(PROFILE_ENDPOINT).await {
            Ok(user) => {
                info!(user_id = user.id, "session restored from stored token");
                cell.send_modify(|session| {
                    session.user = Some(user);
                    session.token = Some(token);
                });
            }
            Err(err) => {
                warn!(%err, "stored token could not be validated; discarding it");
                self.discard_local();
            }
        }
    }

    /// Submit credentials. `remember` is forwarded to the server only.
    pub async fn login(&self, email: &str, password: &str, remember: bool) -> AuthOutcome {
        let request = LoginRequest { email, password, remember };
        match self.api.post::<_, AuthPayload>(LOGIN_ENDPOINT, &request).await {
            Ok(payload) => self.establish(payload, AuthAction::Login),
            Err(err) => {
                warn!(%err, "login failed");
                AuthAction::Login.outcome_for(&err)
            }
        }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> AuthOutcome {
        let request = RegisterRequest { name, email, password, password_confirmation };
        match self.api.post::<_, AuthPayload>(REGISTER_ENDPOINT, &request).await {
            Ok(payload) => self.establish(payload, AuthAction::Register),
            Err(err) => {
                warn!(%err, "registration failed");
                AuthAction::Register.outcome_for(&err)
            }
        }
    }

    /// Sign out. The server is told when a token exists; local state is
    /// cleared whatever happens to that call.
    pub async fn logout(&self) {
        let _cleanup = LogoutCleanup(self);

        if self.api.bearer_token().is_none() {
            debug!("logout without a token; clearing local state only");
            return;
        }
        match self.api.post_empty(LOGOUT_ENDPOINT).await {
            Ok(_) => info!("signed out"),
            Err(err) => warn!(%err, "logout notification failed; clearing local state anyway"),
        }
    }

    /// Replace the signed-in user after a profile edit.
    pub fn refresh_user(&self, user: User) {
        self.api.session_cell().send_if_modified(|session| {
            if session.token.is_none() {
                return false;
            }
            session.user = Some(user);
            true
        });
    }

    fn establish(&self, payload: AuthPayload, action: AuthAction) -> AuthOutcome {
        let AuthPayload { user, token } = payload;
        if token.trim().is_empty() {
            warn!(?action, "server accepted credentials but sent no token");
            return AuthOutcome::failure(action.fallback_message());
        }

        if let Err(err) = self.api.tokens().save(&token) {
            warn!(%err, "could not persist token; session will not survive a reload");
        }
        self.api.set_auth_token(Some(&token));
        self.api.session_cell().send_modify(|session| {
            session.user = Some(user.clone());
            session.token = Some(token);
            session.loading = false;
        });
        info!(user_id = user.id, ?action, "signed in");
        AuthOutcome::Success { user }
    }

    fn discard_local(&self) {
        if let Err(err) = self.api.tokens().clear() {
            warn!(%err, "failed to clear stored token");
        }
        self.api.set_auth_token(None);
        self.api.session_cell().send_modify(Session::clear);
    }
}

struct LoadingGuard<'a>(&'a watch::Sender<Session>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.send_if_modified(|session| std::mem::replace(&mut session.loading, false));
    }
}

struct LogoutCleanup<'a>(&'a SessionStore);

impl Drop for LogoutCleanup<'_> {
    fn drop(&mut self) {
        self.0.discard_local();
    }
}
