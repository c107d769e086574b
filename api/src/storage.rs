//! Durable bearer-token storage.
//!
//! One key, one string. The browser keeps it in `localStorage`, the CLI in a
//! file; tests use [`MemoryTokenStore`].

use parking_lot::Mutex;

/// Key the token lives under in browser storage.
pub const TOKEN_KEY: &str = "auth_token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store does not exist in this environment.
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
    /// Reading or writing the backing store failed.
    #[error("token storage write failed: {0}")]
    Write(String),
}

pub trait TokenStore: Send + Sync {
    /// The persisted token, if any. Blank values count as absent.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn save(&self, token: &str) -> Result<(), StorageError>;

    /// Remove the persisted token. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the removal.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone().filter(|token| !token.trim().is_empty())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock() = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock() = None;
        Ok(())
    }
}
